//! Authentication primitives - password hashing, validation, token signing

mod jwt;
mod password;

pub use jwt::{generate_refresh_value, Claims, JwtService};
pub use password::{
    hash_password, validate_email, validate_password_strength, verify_password, PasswordService,
};
