use serde::{Deserialize, Serialize};

use crate::types::{Product, ProductStatus};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductsState {
    pub products: Vec<Product>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ProductsState {
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn low_stock(&self, threshold: u32) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(move |p| p.stock <= threshold)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProductsAction {
    FetchPending,
    FetchFulfilled(Vec<Product>),
    FetchRejected(String),
    UpdateStock { id: String, stock: u32 },
    UpdateStatus { id: String, status: ProductStatus },
}

pub fn reduce(state: &mut ProductsState, action: ProductsAction) {
    match action {
        ProductsAction::FetchPending => {
            state.loading = true;
            state.error = None;
        }
        ProductsAction::FetchFulfilled(products) => {
            state.loading = false;
            state.products = products;
        }
        ProductsAction::FetchRejected(message) => {
            state.loading = false;
            state.error = Some(message);
        }
        ProductsAction::UpdateStock { id, stock } => {
            if let Some(product) = state.products.iter_mut().find(|p| p.id == id) {
                product.stock = stock;
            }
        }
        ProductsAction::UpdateStatus { id, status } => {
            if let Some(product) = state.products.iter_mut().find(|p| p.id == id) {
                product.status = status;
            }
        }
    }
}
