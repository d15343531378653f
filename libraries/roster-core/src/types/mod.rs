mod collection;
mod draft;
mod ids;
mod user;

pub use collection::{MergeOutcome, UserCollection};
pub use draft::{CreationDraft, DraftField, FieldError, NewUser, MAX_NAME_LEN};
pub use ids::UserId;
pub use user::{parse_timestamp, Role, User};
