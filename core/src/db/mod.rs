pub mod group;
pub mod poll;
pub mod store;
pub mod user;

#[cfg(feature = "memory")]
mod memory;
#[cfg(feature = "mongo")]
mod mongo;

pub use mongodb::{
    bson::{doc, oid::ObjectId},
    error::Error as MongoError
};

pub use group::Group;
pub use poll::{Poll, Question};
pub use store::{Store, StoreError};
pub use user::User;

#[cfg(feature = "memory")]
pub use memory::MemoryStore;
#[cfg(feature = "mongo")]
pub use mongo::{MongoStore, init_mongo};
