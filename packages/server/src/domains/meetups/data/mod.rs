pub mod requests;
pub mod views;

pub use requests::{
    decode_mutation, decode_query, DeleteResponseRequest, OwnerTokenRequest,
    ParticipantTokenRequest, SaveEventRequest, SaveResponseRequest, MAX_MUTATION_BYTES,
    MAX_QUERY_BYTES,
};
pub use views::{AdminView, ApiResponse, DateView, OwnerView, ParticipantView, ResponseView, TokenPair};
