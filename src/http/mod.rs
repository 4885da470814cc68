//! HTTP API module for Apparitions
//!
//! Provides JSON endpoints for:
//! - The filtered, sorted event listing
//! - Per-event detail by slug
//! - The category list

pub mod server;

pub use server::{
    create_server, parse_listing_params, query_pairs, start_server, AppState, CategoriesResponse,
    ErrorResponse, EventDetailResponse, EventSummary, ListingResponse, SortOption,
    SuccessResponse,
};
