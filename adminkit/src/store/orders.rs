use serde::{Deserialize, Serialize};

use crate::types::{Order, OrderStatus};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrdersState {
    pub orders: Vec<Order>,
    pub loading: bool,
    pub error: Option<String>,
}

impl OrdersState {
    pub fn get(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn count_by_status(&self, status: OrderStatus) -> usize {
        self.orders.iter().filter(|o| o.status == status).count()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OrdersAction {
    FetchPending,
    FetchFulfilled(Vec<Order>),
    FetchRejected(String),
    /// Any status may follow any other; the pipeline order is not enforced.
    UpdateStatus { id: String, status: OrderStatus },
}

pub fn reduce(state: &mut OrdersState, action: OrdersAction) {
    match action {
        OrdersAction::FetchPending => {
            state.loading = true;
            state.error = None;
        }
        OrdersAction::FetchFulfilled(orders) => {
            state.loading = false;
            state.orders = orders;
        }
        OrdersAction::FetchRejected(message) => {
            state.loading = false;
            state.error = Some(message);
        }
        OrdersAction::UpdateStatus { id, status } => {
            if let Some(order) = state.orders.iter_mut().find(|o| o.id == id) {
                order.status = status;
            }
        }
    }
}
