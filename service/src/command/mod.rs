//! [`Command`] definition.

pub mod create_client;
pub mod create_property;
pub mod delete_client;
pub mod delete_property;
pub mod update_client;
pub mod update_client_status;
pub mod update_property;
pub mod update_property_status;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_client::CreateClient, create_property::CreateProperty,
    delete_client::DeleteClient, delete_property::DeleteProperty,
    update_client::UpdateClient, update_client_status::UpdateClientStatus,
    update_property::UpdateProperty,
    update_property_status::UpdatePropertyStatus,
};
