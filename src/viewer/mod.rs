//! Modal viewers: one generic state machine, a binding registry, and the
//! gallery, seller-detail and social-post instantiations.

mod controller;
mod modals;
mod registry;

pub use controller::{Populate, ViewerController, ViewerHandle, ViewerState};
pub use modals::{
    GALLERY_MODAL, SELLER_MODAL, SOCIAL_MODAL, action_label, bind_gallery, bind_seller,
    bind_social,
};
pub use registry::{Controls, ViewerRegistry};
