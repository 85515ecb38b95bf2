//! Design tokens for a Tailwind-styled site: a validated, read-only registry
//! built by deep merging site overrides over a base token set.

extern crate self as tesserae_tokens;

pub mod theme;

pub mod registry;
pub use registry::{
    DanglingReferenceError, LoadError, MalformedTokenError, NotFoundError, RegistryError,
    TokenRegistry, TokenValue,
};

mod utils;
pub use utils::{ColorParseError, CssColor, Rgba, RgbaExt, is_color, parse_color, rgb_a};

mod assets;
pub use assets::*;

mod init;
pub use init::*;

pub use tesserae_tokens_macros::TokenField;
