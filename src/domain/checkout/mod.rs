//! Checkout domain module.
//!
//! Types for starting a provider-hosted checkout: the caller's request,
//! priced line items, redirect URLs, and the resulting session.
//!
//! # Module Structure
//!
//! - `request` - CheckoutRequest and catalog resolution
//! - `redirect` - Redirect base URL and success/cancel URLs
//! - `session` - CheckoutSession returned to callers
//! - `errors` - CheckoutError

mod errors;
mod redirect;
mod request;
mod session;

pub use errors::CheckoutError;
pub use redirect::{RedirectBase, RedirectUrls, RequestOrigin};
pub use request::{CheckoutRequest, LineItem, RequestedItem, MAX_LINE_ITEMS, MAX_QUANTITY};
pub use session::{CheckoutSession, SetupFutureUsage};
