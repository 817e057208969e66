use kernel::id::Id;

/// Store-assigned user identifier (UUID v4)
pub struct UserMarker;
pub type UserId = Id<UserMarker>;
