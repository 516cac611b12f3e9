//! Users Domain
//!
//! Accounts with argon2 password hashes, JWT issuing on register and login,
//! profile management and the admin user listing.
//!
//! ```text
//! handlers ─► UserService ─► UserRepository ─► MongoUserRepository
//!                 │
//!                 └─► JwtAuth (axum-helpers)
//! ```
//!
//! Emails are stored lowercased and kept unique by an index, so a concurrent
//! duplicate registration still fails with `EmailTaken`.

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{UserError, UserResult};
pub use handlers::{AdminApiDoc, ApiDoc, ProfileApiDoc};
pub use models::{
    AuthResponse, LoginRequest, PublicUser, RegisterRequest, Role, UpdateProfile, User,
    UserFilter, UserList,
};
pub use mongodb::MongoUserRepository;
pub use repository::UserRepository;
pub use service::UserService;
