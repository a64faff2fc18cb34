use std::sync::LazyLock;

use regex::Regex;

use crate::{FieldName, FieldValue, FormValues};

/// Email grammar of the HTML `input[type=email]` control.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is a valid regex")
});

/// Check if `input` is a syntactically valid email address.
pub fn is_valid_email(input: &str) -> bool {
    EMAIL_PATTERN.is_match(input)
}

/// A cross-field predicate. Receives the field's own value (if any) and the
/// entire current snapshot.
pub type CustomTest = fn(Option<&FieldValue>, &FormValues) -> bool;

/// The order in which rules of a field are evaluated.
///
/// The first failing rule, in this order, is the reported error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RulePriority {
    Required,
    Format,
    Length,
    Custom,
}

/// A single validation predicate paired with its error message.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Value must be present; text must be non-empty.
    Required { message: String },

    /// Non-empty text must be a valid email address.
    Email { message: String },

    /// Text must be at least `min` characters long.
    MinLength { min: usize, message: String },

    /// Text must be at most `max` characters long.
    MaxLength { max: usize, message: String },

    /// Arbitrary predicate over the field and its siblings.
    Custom {
        name: &'static str,
        message: String,
        test: CustomTest,
    },
}

impl Rule {
    pub fn required(message: impl Into<String>) -> Self {
        Self::Required {
            message: message.into(),
        }
    }

    pub fn email(message: impl Into<String>) -> Self {
        Self::Email {
            message: message.into(),
        }
    }

    pub fn min_length(min: usize, message: impl Into<String>) -> Self {
        Self::MinLength {
            min,
            message: message.into(),
        }
    }

    pub fn max_length(max: usize, message: impl Into<String>) -> Self {
        Self::MaxLength {
            max,
            message: message.into(),
        }
    }

    pub fn custom(name: &'static str, message: impl Into<String>, test: CustomTest) -> Self {
        Self::Custom {
            name,
            message: message.into(),
            test,
        }
    }

    pub fn priority(&self) -> RulePriority {
        match self {
            Self::Required { .. } => RulePriority::Required,
            Self::Email { .. } => RulePriority::Format,
            Self::MinLength { .. } | Self::MaxLength { .. } => RulePriority::Length,
            Self::Custom { .. } => RulePriority::Custom,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Required { message }
            | Self::Email { message }
            | Self::MinLength { message, .. }
            | Self::MaxLength { message, .. }
            | Self::Custom { message, .. } => message,
        }
    }

    /// Evaluate the rule against a field value and the whole snapshot.
    pub fn passes(&self, value: Option<&FieldValue>, values: &FormValues) -> bool {
        match self {
            Self::Required { .. } => value.is_some_and(|v| !v.is_empty_text()),
            Self::Email { .. } => match value {
                Some(FieldValue::Text(s)) => s.is_empty() || is_valid_email(s),
                _ => true,
            },
            Self::MinLength { min, .. } => match value {
                Some(FieldValue::Text(s)) => s.chars().count() >= *min,
                _ => true,
            },
            Self::MaxLength { max, .. } => match value {
                Some(FieldValue::Text(s)) => s.chars().count() <= *max,
                _ => true,
            },
            Self::Custom { test, .. } => test(value, values),
        }
    }
}

/// The input primitive a field is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text input.
    Input,

    /// Text input with hidden characters (passwords).
    Masked,

    /// On/off switch.
    Toggle,
}

impl FieldKind {
    /// The value a fresh form starts with for this kind.
    pub fn initial_value(&self) -> FieldValue {
        match self {
            Self::Input | Self::Masked => FieldValue::Text(String::new()),
            Self::Toggle => FieldValue::Bool(false),
        }
    }

    /// The type name values of this kind must have.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Input | Self::Masked => "string",
            Self::Toggle => "boolean",
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Input | Self::Masked)
    }
}

/// Declarative description of one form field: how it is presented and
/// which rules its value must satisfy.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    name: FieldName,
    label: String,
    placeholder: Option<String>,
    kind: FieldKind,
    initial: FieldValue,
    /// Kept sorted by `RulePriority`, declaration order within a priority.
    rules: Vec<Rule>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<FieldName>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            placeholder: None,
            kind,
            initial: kind.initial_value(),
            rules: Vec::new(),
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_initial(mut self, initial: impl Into<FieldValue>) -> Self {
        self.initial = initial.into();
        self
    }

    /// Add a rule. Rules are evaluated by priority, not insertion order.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        let idx = self
            .rules
            .partition_point(|existing| existing.priority() <= rule.priority());
        self.rules.insert(idx, rule);
        self
    }

    pub fn name(&self) -> &FieldName {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn initial(&self) -> &FieldValue {
        &self.initial
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The message of the first violated rule, or `None` if the field is valid.
    pub fn first_violation(&self, values: &FormValues) -> Option<String> {
        let value = values.get(self.name.as_str());

        let mut rules = self.rules.iter().peekable();
        while let Some(rule) = rules.next_if(|r| r.priority() == RulePriority::Required) {
            if !rule.passes(value, values) {
                return Some(rule.message().to_string());
            }
        }

        if let Some(v) = value
            && v.type_name() != self.kind.type_name()
        {
            return Some(format!(
                "{} must be a `{}` type",
                self.label,
                self.kind.type_name()
            ));
        }

        rules
            .find(|rule| !rule.passes(value, values))
            .map(|rule| rule.message().to_string())
    }
}
