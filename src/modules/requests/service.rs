//! Purchase and swap request flows.
//!
//! Creation resolves both parties first and writes nothing unless both are
//! known. Requests are never deduplicated: asking twice stores two pending
//! records.

use bookswap_auth::Session;
use bookswap_store::{to_fields, Document, DocumentStore};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::models::{
    NewPurchaseRequest, NewSwapRequest, PurchaseRequest, RequestDirection, RequestKind,
    RequestList, RequestStatus, SwapRequest, PURCHASE_REQUESTS, SWAP_REQUESTS,
};
use crate::error::{MarketError, MarketResult};
use crate::modules::books::{models::Book, service::get_book};
use crate::modules::users::service::session_user_id;

/// Initiator and counterparty of a request on one book.
struct Parties {
    initiator: String,
    owner: String,
    book: Book,
}

async fn resolve_parties(
    store: &dyn DocumentStore,
    session: &Session,
    book_id: &str,
) -> MarketResult<Parties> {
    let initiator = session_user_id(store, session).await?;
    let book = get_book(store, book_id).await?;
    let owner = book.as_ref().and_then(|book| book.owner_id.clone());

    match (initiator, owner, book) {
        (Some(initiator), Some(owner), Some(book)) => Ok(Parties {
            initiator,
            owner,
            book,
        }),
        (initiator, owner, _) => {
            tracing::warn!(
                book_id,
                initiator_resolved = initiator.is_some(),
                owner_resolved = owner.is_some(),
                "request aborted: missing user or book owner"
            );
            Err(MarketError::MissingInfo)
        }
    }
}

/// Ask to buy `book_id` at its current price.
pub async fn create_purchase_request(
    store: &dyn DocumentStore,
    session: &Session,
    book_id: &str,
) -> MarketResult<PurchaseRequest> {
    let parties = resolve_parties(store, session, book_id).await?;

    let draft = NewPurchaseRequest {
        book_id: &parties.book.id,
        buyer_id: &parties.initiator,
        seller_id: &parties.owner,
        price: parties.book.price,
        status: RequestStatus::Pending,
    };
    let fields = to_fields(&draft)?;
    let id = store.insert(PURCHASE_REQUESTS, fields.clone()).await?;

    tracing::info!(
        request_id = %id,
        book_id,
        buyer_id = %parties.initiator,
        seller_id = %parties.owner,
        "purchase request created"
    );
    Ok(Document::new(PURCHASE_REQUESTS, id, fields).decode()?)
}

/// Offer a swap for `book_id`.
///
/// `offered_book_id`, when given, must be a listing owned by the offeror.
pub async fn create_swap_request(
    store: &dyn DocumentStore,
    session: &Session,
    book_id: &str,
    offered_book_id: Option<&str>,
) -> MarketResult<SwapRequest> {
    let parties = resolve_parties(store, session, book_id).await?;

    if let Some(offered_id) = offered_book_id {
        let offered = get_book(store, offered_id).await?;
        let owned = offered
            .is_some_and(|book| book.owner_id.as_deref() == Some(parties.initiator.as_str()));
        if !owned {
            tracing::warn!(
                offered_book_id = offered_id,
                from_user_id = %parties.initiator,
                "swap aborted: offered book is not the offeror's listing"
            );
            return Err(MarketError::MissingInfo);
        }
    }

    let draft = NewSwapRequest {
        requested_book_id: &parties.book.id,
        from_user_id: &parties.initiator,
        to_user_id: &parties.owner,
        offered_book_id,
        status: RequestStatus::Pending,
    };
    let fields = to_fields(&draft)?;
    let id = store.insert(SWAP_REQUESTS, fields.clone()).await?;

    tracing::info!(
        request_id = %id,
        book_id,
        from_user_id = %parties.initiator,
        to_user_id = %parties.owner,
        "swap request created"
    );
    Ok(Document::new(SWAP_REQUESTS, id, fields).decode()?)
}

async fn query_requests<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    kind: RequestKind,
    field: &str,
    user_id: &str,
) -> MarketResult<Vec<T>> {
    store
        .query_eq(kind.collection(), field, &Value::from(user_id))
        .await?
        .iter()
        .map(|doc| doc.decode::<T>().map_err(Into::into))
        .collect()
}

/// Requests where the signed-in user sits on the `direction` side.
///
/// Empty when the session has no user record.
pub async fn list_requests(
    store: &dyn DocumentStore,
    session: &Session,
    direction: RequestDirection,
) -> MarketResult<RequestList> {
    let Some(user_id) = session_user_id(store, session).await? else {
        return Ok(RequestList::default());
    };

    let purchases = query_requests(
        store,
        RequestKind::Purchase,
        direction.field(RequestKind::Purchase),
        &user_id,
    )
    .await?;
    let swaps = query_requests(
        store,
        RequestKind::Swap,
        direction.field(RequestKind::Swap),
        &user_id,
    )
    .await?;

    Ok(RequestList { purchases, swaps })
}

/// Delete one request from the store and from the list it was shown in.
pub async fn delete_request(
    store: &dyn DocumentStore,
    list: &mut RequestList,
    kind: RequestKind,
    id: &str,
) -> MarketResult<()> {
    let existed = store.delete(kind.collection(), id).await?;
    list.remove(kind, id);

    tracing::info!(kind = ?kind, request_id = id, existed, "request deleted");
    Ok(())
}
