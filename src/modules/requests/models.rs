use serde::{Deserialize, Serialize};

pub const PURCHASE_REQUESTS: &str = "purchaseRequests";
pub const SWAP_REQUESTS: &str = "swapRequests";

/// Lifecycle state of a request. Only `pending` is ever written here;
/// resolution happens outside the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Resolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Purchase,
    Swap,
}

impl RequestKind {
    pub fn collection(self) -> &'static str {
        match self {
            RequestKind::Purchase => PURCHASE_REQUESTS,
            RequestKind::Swap => SWAP_REQUESTS,
        }
    }
}

/// Which side of a request the caller is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestDirection {
    /// Requests the caller created
    #[default]
    Outgoing,
    /// Requests addressed to the caller
    Incoming,
}

impl RequestDirection {
    /// Field holding the caller's identifier in records of `kind`.
    pub fn field(self, kind: RequestKind) -> &'static str {
        match (self, kind) {
            (RequestDirection::Outgoing, RequestKind::Purchase) => "buyerID",
            (RequestDirection::Outgoing, RequestKind::Swap) => "fromUserID",
            (RequestDirection::Incoming, RequestKind::Purchase) => "sellerID",
            (RequestDirection::Incoming, RequestKind::Swap) => "toUserID",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRequest {
    pub id: String,
    #[serde(rename = "bookID")]
    pub book_id: String,
    #[serde(rename = "buyerID")]
    pub buyer_id: String,
    #[serde(rename = "sellerID")]
    pub seller_id: String,
    /// Book price when the request was made
    pub price: f64,
    pub status: RequestStatus,
}

/// Stored fields of a purchase request before the store assigns an id.
#[derive(Debug, Clone, Serialize)]
pub struct NewPurchaseRequest<'a> {
    #[serde(rename = "bookID")]
    pub book_id: &'a str,
    #[serde(rename = "buyerID")]
    pub buyer_id: &'a str,
    #[serde(rename = "sellerID")]
    pub seller_id: &'a str,
    pub price: f64,
    pub status: RequestStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapRequest {
    pub id: String,
    #[serde(rename = "requestedBookID")]
    pub requested_book_id: String,
    #[serde(rename = "fromUserID")]
    pub from_user_id: String,
    #[serde(rename = "toUserID")]
    pub to_user_id: String,
    /// Book put up in exchange, when the offeror picked one
    #[serde(rename = "offeredBookID", default)]
    pub offered_book_id: Option<String>,
    pub status: RequestStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewSwapRequest<'a> {
    #[serde(rename = "requestedBookID")]
    pub requested_book_id: &'a str,
    #[serde(rename = "fromUserID")]
    pub from_user_id: &'a str,
    #[serde(rename = "toUserID")]
    pub to_user_id: &'a str,
    #[serde(rename = "offeredBookID")]
    pub offered_book_id: Option<&'a str>,
    pub status: RequestStatus,
}

/// Requests shown to one user, split by kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RequestList {
    pub purchases: Vec<PurchaseRequest>,
    pub swaps: Vec<SwapRequest>,
}

impl RequestList {
    pub fn contains(&self, kind: RequestKind, id: &str) -> bool {
        match kind {
            RequestKind::Purchase => self.purchases.iter().any(|request| request.id == id),
            RequestKind::Swap => self.swaps.iter().any(|request| request.id == id),
        }
    }

    /// Drop the entry with `id`. Returns whether one was present.
    pub fn remove(&mut self, kind: RequestKind, id: &str) -> bool {
        let before = self.len();
        match kind {
            RequestKind::Purchase => self.purchases.retain(|request| request.id != id),
            RequestKind::Swap => self.swaps.retain(|request| request.id != id),
        }
        self.len() != before
    }

    pub fn len(&self) -> usize {
        self.purchases.len() + self.swaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseInput {
    pub book_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapInput {
    pub book_id: String,
    #[serde(default)]
    pub offered_book_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestQuery {
    #[serde(default)]
    pub direction: RequestDirection,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn purchase(id: &str) -> PurchaseRequest {
        PurchaseRequest {
            id: id.into(),
            book_id: "b1".into(),
            buyer_id: "u1".into(),
            seller_id: "u2".into(),
            price: 120.0,
            status: RequestStatus::Pending,
        }
    }

    #[test]
    fn remove_only_touches_matching_kind_and_id() {
        let mut list = RequestList {
            purchases: vec![purchase("p1"), purchase("p2")],
            swaps: vec![],
        };

        assert!(!list.remove(RequestKind::Swap, "p1"));
        assert!(list.remove(RequestKind::Purchase, "p1"));
        assert_eq!(list.purchases, vec![purchase("p2")]);
        assert!(!list.contains(RequestKind::Purchase, "p1"));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn direction_selects_identifier_field() {
        assert_eq!(RequestDirection::default(), RequestDirection::Outgoing);
        assert_eq!(RequestDirection::Outgoing.field(RequestKind::Swap), "fromUserID");
        assert_eq!(RequestDirection::Incoming.field(RequestKind::Purchase), "sellerID");
    }

    #[test]
    fn status_uses_lowercase_wire_form() {
        assert_eq!(
            serde_json::to_value(RequestStatus::Pending).unwrap(),
            serde_json::json!("pending")
        );
    }
}
