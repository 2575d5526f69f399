//! Clients for the external collaborators: the NAV feed, the Fold identity
//! service, and the unfold sync tool.

pub mod fold;
pub mod mfapi;
pub mod unfold;
