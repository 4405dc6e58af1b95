//! Supabase adapter for the remote quest dataset

mod client;
pub mod query;

pub use client::{SupabaseQuestStore, METADATA_TABLE, QUESTS_TABLE, WORLDS_TABLE};
pub use query::TableQuery;
