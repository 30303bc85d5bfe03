#[macro_export]
/// The `require_fields!` macro checks that the named fields of a struct carry a non-blank value
/// and reports the label of the first one that does not.
///
/// This macro supports:
/// - `String` fields, blank when empty or whitespace only
/// - `Option` fields (`Option<String>`), blank when `None` or when the inner string is blank
/// - Checking fields in declaration order, so the reported label is deterministic
///
/// # Usage
///
/// ```rust
/// use ultradns_macros::require_fields;
///
/// struct Credentials {
///     username: String,
///     password: Option<String>,
/// }
///
/// let credentials = Credentials { username: "admin".into(), password: None };
///
/// let checked: Result<(), &'static str> = require_fields!(credentials, {
///     username: String => "username",
///     password: Option => "password",
/// });
///
/// assert_eq!(checked, Err("password"));
/// ```
///
/// Where:
/// - `credentials` is any expression whose fields can be borrowed
/// - `username`, `password`, etc., are the field names to check
/// - `String` or `Option` selects how blankness is tested
/// - the literal is the label returned when that field is blank
///
macro_rules! require_fields {
    // Blank test helpers, one per supported field shape
    (@blank $source:expr, $field:ident, String) => {
        $source.$field.trim().is_empty()
    };
    (@blank $source:expr, $field:ident, Option) => {
        $source
            .$field
            .as_deref()
            .map(str::trim)
            .map_or(true, str::is_empty)
    };

    // Main macro
    (
        $source:expr,
        {
            $( $field:ident : $shape:ident => $label:literal ),* $(,)?
        }
    ) => {{
        let mut missing: ::core::option::Option<&'static str> = ::core::option::Option::None;
        $(
            if missing.is_none() && $crate::require_fields!(@blank $source, $field, $shape) {
                missing = ::core::option::Option::Some($label);
            }
        )*
        match missing {
            ::core::option::Option::Some(label) => ::core::result::Result::Err(label),
            ::core::option::Option::None => ::core::result::Result::Ok(()),
        }
    }};
}

#[cfg(test)]
mod tests {
    struct Settings {
        host: String,
        username: String,
        password: Option<String>,
    }

    fn settings(host: &str, username: &str, password: Option<&str>) -> Settings {
        Settings {
            host: host.to_string(),
            username: username.to_string(),
            password: password.map(str::to_string),
        }
    }

    #[test]
    fn all_present_passes() {
        let s = settings("https://api.example.com", "user", Some("secret"));
        let checked: Result<(), &'static str> = require_fields!(s, {
            host: String => "host url",
            username: String => "username",
            password: Option => "password",
        });
        assert_eq!(checked, Ok(()));
    }

    #[test]
    fn reports_first_missing_in_order() {
        let s = settings("", "", None);
        let checked: Result<(), &'static str> = require_fields!(s, {
            username: String => "username",
            host: String => "host url",
        });
        assert_eq!(checked, Err("username"));
    }

    #[test]
    fn whitespace_counts_as_missing() {
        let s = settings("h", "user", Some("   "));
        let checked: Result<(), &'static str> = require_fields!(s, {
            password: Option => "password",
        });
        assert_eq!(checked, Err("password"));
    }
}
