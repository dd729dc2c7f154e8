use graphql_parser::schema::{Directive, Value};

/// `@key(fields: "...")` on an object type.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct KeyDirective {
    pub fields: String,
}

impl KeyDirective {
    pub const NAME: &str = "key";

    pub fn is(directive: &Directive<'_, String>) -> bool {
        directive.name == Self::NAME
    }
}

impl From<&Directive<'_, String>> for KeyDirective {
    fn from(directive: &Directive<'_, String>) -> Self {
        Self {
            fields: fields_argument(directive),
        }
    }
}

/// `@requires(fields: "...")` on a field.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RequiresDirective {
    pub fields: String,
}

impl RequiresDirective {
    pub const NAME: &str = "requires";

    pub fn is(directive: &Directive<'_, String>) -> bool {
        directive.name == Self::NAME
    }
}

impl From<&Directive<'_, String>> for RequiresDirective {
    fn from(directive: &Directive<'_, String>) -> Self {
        Self {
            fields: fields_argument(directive),
        }
    }
}

/// `@provides(fields: "...")` on a field.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProvidesDirective {
    pub fields: String,
}

impl ProvidesDirective {
    pub const NAME: &str = "provides";

    pub fn is(directive: &Directive<'_, String>) -> bool {
        directive.name == Self::NAME
    }
}

impl From<&Directive<'_, String>> for ProvidesDirective {
    fn from(directive: &Directive<'_, String>) -> Self {
        Self {
            fields: fields_argument(directive),
        }
    }
}

/// `@external` marker on a field owned by another service.
pub struct ExternalDirective {}

impl ExternalDirective {
    pub const NAME: &str = "external";

    pub fn is(directive: &Directive<'_, String>) -> bool {
        directive.name == Self::NAME
    }
}

fn fields_argument(directive: &Directive<'_, String>) -> String {
    for (arg_name, arg_value) in &directive.arguments {
        if arg_name.eq("fields") {
            if let Value::String(value) = arg_value {
                return value.clone();
            }
        }
    }

    String::new()
}
