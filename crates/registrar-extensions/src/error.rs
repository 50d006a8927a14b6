/// Errors that can occur while ordering and serializing extensions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A definition names a type that no constraint source knows about.
    #[error("extension type \"{type_id}\" does not exist or is not declared by any package")]
    UnresolvableType { type_id: String },

    /// Every dependency of the candidate is placed, but no position satisfies
    /// its constraints (or its dependencies can never become available).
    #[error(
        "internal conflict in dependencies: \"{candidate_type_id}\" requires conditions that \
         conflict with another extension; successfully registered extensions: [{}]",
        .registered.join(", ")
    )]
    OrderingConflict {
        candidate_type_id: String,
        registered: Vec<String>,
    },

    /// A candidate was deferred more often than the retry budget allows.
    #[error(
        "infinite recursion suspected while sorting extension \"{type_id}\" \
         (deferred {attempts} times); simplify the conditions so they do not refute each other"
    )]
    RetryBudgetExceeded { type_id: String, attempts: u32 },

    /// A definition is neither a type string nor a `{value, attributes}` object.
    #[error("extension definition is not a valid container definition: {payload}")]
    MalformedPayload { payload: String },

    /// Text that should be a call expression such as `Foo(a, b)`.
    #[error("invalid call expression '{input}': {reason}")]
    InvalidCallExpression { input: String, reason: String },

    /// Failed to parse a TOML type manifest.
    #[error("failed to parse type manifest: {0}")]
    ManifestParse(#[from] toml::de::Error),
}

impl Error {
    pub(crate) fn malformed(payload: &serde_json::Value) -> Self {
        Self::MalformedPayload {
            payload: payload.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
