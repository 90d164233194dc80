use convert_case::{Case, Casing};

///
/// Naming-convention transforms shared by the resolver layer and the
/// path deriver. Schema names are declared in any case; emitted
/// artifacts need stable camel, lower and title renditions.
///

/// Convert a schema name to camel case, ie. "UserRole" to "userRole".
#[must_use]
pub fn camel(name: &str) -> String {
    name.to_case(Case::Camel)
}

/// Convert a schema name to all-lowercase, ie. "Profile" to "profile".
#[must_use]
pub fn lower(name: &str) -> String {
    name.to_lowercase()
}

/// Convert a schema name to title case, ie. "userRole" to "UserRole".
#[must_use]
pub fn title(name: &str) -> String {
    name.to_case(Case::Pascal)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_joins_separated_words() {
        assert_eq!(camel("user_role"), "userRole");
        assert_eq!(camel("UserRole"), "userRole");
        assert_eq!(camel("profile"), "profile");
    }

    #[test]
    fn lower_flattens_case() {
        assert_eq!(lower("UserRole"), "userrole");
        assert_eq!(lower("Profile"), "profile");
    }

    #[test]
    fn title_capitalizes_each_word() {
        assert_eq!(title("user_role"), "UserRole");
        assert_eq!(title("auth"), "Auth");
    }
}
