use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::VastraError;
use crate::models::Product;

const MEN_DATA: &str = include_str!("../../../data/men.json");
const WHOLESALE_DATA: &str = include_str!("../../../data/wholesale.json");
const PRE_ORDER_DATA: &str = include_str!("../../../data/pre_order.json");
const NEW_ARRIVALS_DATA: &str = include_str!("../../../data/new_arrivals.json");

/// The four storefront catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogKind {
    Men,
    Wholesale,
    PreOrder,
    NewArrivals,
}

impl CatalogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Men => "Men",
            Self::Wholesale => "Wholesale",
            Self::PreOrder => "Pre-Order",
            Self::NewArrivals => "New Arrivals",
        }
    }

    /// File stem of the catalog's JSON document.
    pub fn as_file_str(&self) -> &'static str {
        match self {
            Self::Men => "men",
            Self::Wholesale => "wholesale",
            Self::PreOrder => "pre_order",
            Self::NewArrivals => "new_arrivals",
        }
    }

    pub fn from_file_str(s: &str) -> Option<Self> {
        match s {
            "men" => Some(Self::Men),
            "wholesale" => Some(Self::Wholesale),
            "pre_order" => Some(Self::PreOrder),
            "new_arrivals" => Some(Self::NewArrivals),
            _ => None,
        }
    }

    pub const ALL: &[CatalogKind] = &[
        Self::Men,
        Self::Wholesale,
        Self::PreOrder,
        Self::NewArrivals,
    ];
}

impl std::fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The document shape the catalogs ship in.
#[derive(Deserialize)]
struct CatalogDoc {
    products: Vec<Product>,
}

/// One catalog: an ordered, read-only product list.
#[derive(Debug, Clone)]
pub struct Catalog {
    kind: CatalogKind,
    products: Vec<Product>,
}

impl Catalog {
    /// Parse a catalog JSON document of the shape `{"products": [...]}`.
    /// Products that violate the price ordering are kept but logged.
    pub fn parse(kind: CatalogKind, data: &str) -> Result<Self, VastraError> {
        let doc: CatalogDoc = serde_json::from_str(data)
            .map_err(|e| VastraError::Catalog(format!("{kind}: {e}")))?;

        for product in &doc.products {
            if product.price < 0.0 || product.original_price < product.price {
                warn!(
                    catalog = %kind,
                    product_id = product.id,
                    price = product.price,
                    original_price = product.original_price,
                    "product violates price ordering"
                );
            }
        }

        Ok(Self {
            kind,
            products: doc.products,
        })
    }

    /// The built-in catalog data compiled into the binary.
    pub fn embedded(kind: CatalogKind) -> Result<Self, VastraError> {
        let data = match kind {
            CatalogKind::Men => MEN_DATA,
            CatalogKind::Wholesale => WHOLESALE_DATA,
            CatalogKind::PreOrder => PRE_ORDER_DATA,
            CatalogKind::NewArrivals => NEW_ARRIVALS_DATA,
        };
        Self::parse(kind, data)
    }

    /// Load a catalog from `<dir>/<kind>.json`.
    pub fn from_dir(kind: CatalogKind, dir: &Path) -> Result<Self, VastraError> {
        let path = dir.join(format!("{}.json", kind.as_file_str()));
        let data = std::fs::read_to_string(&path)?;
        Self::parse(kind, &data)
    }

    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Find a product by id.
    pub fn product(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

/// All four catalogs, loaded together at startup and immutable after.
#[derive(Debug, Clone)]
pub struct CatalogSet {
    men: Catalog,
    wholesale: Catalog,
    pre_order: Catalog,
    new_arrivals: Catalog,
}

impl CatalogSet {
    /// The built-in catalogs.
    pub fn embedded() -> Result<Self, VastraError> {
        Ok(Self {
            men: Catalog::embedded(CatalogKind::Men)?,
            wholesale: Catalog::embedded(CatalogKind::Wholesale)?,
            pre_order: Catalog::embedded(CatalogKind::PreOrder)?,
            new_arrivals: Catalog::embedded(CatalogKind::NewArrivals)?,
        })
    }

    /// Load every catalog from one directory, one JSON file per kind.
    pub fn from_dir(dir: &Path) -> Result<Self, VastraError> {
        Ok(Self {
            men: Catalog::from_dir(CatalogKind::Men, dir)?,
            wholesale: Catalog::from_dir(CatalogKind::Wholesale, dir)?,
            pre_order: Catalog::from_dir(CatalogKind::PreOrder, dir)?,
            new_arrivals: Catalog::from_dir(CatalogKind::NewArrivals, dir)?,
        })
    }

    pub fn get(&self, kind: CatalogKind) -> &Catalog {
        match kind {
            CatalogKind::Men => &self.men,
            CatalogKind::Wholesale => &self.wholesale,
            CatalogKind::PreOrder => &self.pre_order,
            CatalogKind::NewArrivals => &self.new_arrivals,
        }
    }

    /// Find a product in a specific catalog.
    pub fn product(&self, kind: CatalogKind, id: i64) -> Option<&Product> {
        self.get(kind).product(id)
    }
}
