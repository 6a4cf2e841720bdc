pub mod advertisement;

pub use advertisement::{
    UhrpAdvertisement, ValidationError, MIN_FIELDS, PROTOCOL_ADDRESS,
};
