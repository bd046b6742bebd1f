use kernel::id::{Id, markers};
use platform::crypto::{RandomSource, random_array};

pub type UserId = Id<markers::User>;

/// Generate a new UUID v4 user ID from the given randomness source
pub fn generate_user_id(source: &dyn RandomSource) -> UserId {
    UserId::from_random_bytes(random_array(source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::crypto::OsRandom;

    #[test]
    fn test_generated_user_id_is_v4() {
        let user_id = generate_user_id(&OsRandom);
        assert_eq!(user_id.as_uuid().get_version_num(), 4); // UUIDv4
    }

    #[test]
    fn test_generated_user_ids_differ() {
        assert_ne!(generate_user_id(&OsRandom), generate_user_id(&OsRandom));
    }

    #[test]
    fn test_from_uuid() {
        let uuid = uuid::Uuid::new_v4();
        let user_id = UserId::from_uuid(uuid);
        assert_eq!(user_id.as_uuid(), &uuid);
    }
}
