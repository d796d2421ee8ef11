//! Utility functions for the container
//!
//! Naming helpers shared by the registry and the injector.

/// Naming convention utilities for bean names
pub mod naming {
    /// Extracts the simple name from a fully-qualified type name.
    ///
    /// # Examples
    ///
    /// ```
    /// use april_core::utils::naming::simple_name;
    ///
    /// assert_eq!(simple_name("web_demo::controller::DemoController"), "DemoController");
    /// assert_eq!(simple_name("DemoController"), "DemoController");
    /// ```
    pub fn simple_name(type_name: &str) -> &str {
        type_name.rsplit("::").next().unwrap_or(type_name)
    }

    /// Converts a PascalCase type name to camelCase for bean naming.
    ///
    /// This is the default bean naming strategy, similar to Spring's behavior
    /// where `DemoService` becomes `demoService`.
    ///
    /// # Examples
    ///
    /// ```
    /// use april_core::utils::naming::to_camel_case;
    ///
    /// assert_eq!(to_camel_case("DemoService"), "demoService");
    /// assert_eq!(to_camel_case("A"), "a");
    /// assert_eq!(to_camel_case(""), "");
    /// ```
    pub fn to_camel_case(s: &str) -> String {
        let mut chars = s.chars();
        match chars.next() {
            None => String::new(),
            Some(first) => {
                let mut result = String::with_capacity(s.len());
                result.extend(first.to_lowercase());
                result.push_str(chars.as_str());
                result
            }
        }
    }

    /// Default bean key for a fully-qualified type name.
    pub fn default_bean_name(type_name: &str) -> String {
        to_camel_case(simple_name(type_name))
    }
}
