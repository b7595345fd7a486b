pub mod contacts;
pub mod init;
pub mod migrations;
pub mod sessions;

pub use contacts::{delete_contact, flush_store, load_contacts, load_store, save_contact};
pub use init::{get_db_stats, init_db, init_memory_db, DbStats};
pub use sessions::{insert_session, latest_session, list_sessions, load_session, update_session_config};
