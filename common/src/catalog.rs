//! 物件カタログ
//!
//! 組み込みの物件一覧（サーバーなし）

use crate::error::Result;
use crate::types::{Property, PropertyStatus};
use serde::{Deserialize, Serialize};

const PROPERTIES_JSON: &str = include_str!("../data/properties.json");

/// カタログの全物件
pub fn properties() -> Result<Vec<Property>> {
    let properties: Vec<Property> = serde_json::from_str(PROPERTIES_JSON)?;
    Ok(properties)
}

/// IDで物件を検索
pub fn find_property(id: &str) -> Result<Option<Property>> {
    Ok(properties()?.into_iter().find(|p| p.id == id))
}

/// 一覧画面の件数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogStats {
    pub total: usize,
    pub available: usize,
    pub pending: usize,
}

impl CatalogStats {
    pub fn from_properties(properties: &[Property]) -> Self {
        let available = properties
            .iter()
            .filter(|p| p.status == PropertyStatus::Available)
            .count();
        Self {
            total: properties.len(),
            available,
            pending: properties.len() - available,
        }
    }
}

/// 詳細画面で編集できる項目（未指定の項目はそのまま）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PropertyStatus>,
}

impl PropertyPatch {
    pub fn is_empty(&self) -> bool {
        self.location.is_none()
            && self.price.is_none()
            && self.overview.is_none()
            && self.status.is_none()
    }

    /// 後から来た編集で上書き
    pub fn merge(&mut self, newer: PropertyPatch) {
        if newer.location.is_some() {
            self.location = newer.location;
        }
        if newer.price.is_some() {
            self.price = newer.price;
        }
        if newer.overview.is_some() {
            self.overview = newer.overview;
        }
        if newer.status.is_some() {
            self.status = newer.status;
        }
    }

    pub fn apply(&self, property: &mut Property) {
        if let Some(location) = &self.location {
            property.location = location.clone();
        }
        if let Some(price) = self.price {
            property.price = price;
        }
        if let Some(overview) = &self.overview {
            property.overview = overview.clone();
        }
        if let Some(status) = self.status {
            property.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_loads_all_properties() {
        let list = properties().unwrap();
        assert_eq!(list.len(), 4);
        assert_eq!(list[0].name, "Luxury Downtown Condo");
        assert_eq!(list[1].status, PropertyStatus::Pending);
    }

    #[test]
    fn test_find_property() {
        let villa = find_property("4").unwrap().unwrap();
        assert_eq!(villa.kind, "Villa");
        assert_eq!(villa.price, 1_200_000);
        assert!(find_property("99").unwrap().is_none());
    }

    #[test]
    fn test_catalog_stats() {
        let stats = CatalogStats::from_properties(&properties().unwrap());
        assert_eq!(stats.total, 4);
        assert_eq!(stats.available + stats.pending, 4);
        assert_eq!(stats.pending, 1);
    }

    #[test]
    fn test_patch_apply_and_merge() {
        let mut condo = find_property("1").unwrap().unwrap();
        let mut patch = PropertyPatch {
            price: Some(430_000),
            ..Default::default()
        };
        patch.merge(PropertyPatch {
            status: Some(PropertyStatus::Pending),
            ..Default::default()
        });
        assert!(!patch.is_empty());

        patch.apply(&mut condo);
        assert_eq!(condo.price, 430_000);
        assert_eq!(condo.status, PropertyStatus::Pending);
        assert_eq!(condo.location, "123 Main St, Downtown");
        assert!(PropertyPatch::default().is_empty());
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("pending".parse::<PropertyStatus>().unwrap(), PropertyStatus::Pending);
        assert_eq!("Available".parse::<PropertyStatus>().unwrap(), PropertyStatus::Available);
        assert!("sold".parse::<PropertyStatus>().is_err());
    }
}
