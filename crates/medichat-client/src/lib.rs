//! Remote layer for medichat: the HTTP+JSON implementation of the
//! conversation backend contract.

pub mod http_conversation_client;
pub mod wire;

pub use http_conversation_client::HttpConversationClient;
