use std::str::FromStr;

/// How requests to the platform authenticate
#[derive(Clone, PartialEq)]
pub enum Auth {
    /// API key sent as a Bearer token
    Apikey(String),
    /// Username and password via Basic Auth headers (proxied deployments)
    Basic(String, String),
    /// No authentication (platforms running with auth disabled)
    None,
}

impl Auth {
    /// Build the auth of a given type, falling back to `None` when the
    /// credentials that type needs are missing.
    pub fn new(
        auth_type: &AuthType,
        username: Option<String>,
        password: Option<String>,
        apikey: Option<String>,
    ) -> Self {
        match (auth_type, username, password, apikey) {
            (AuthType::Apikey, _, _, Some(apikey)) => Self::Apikey(apikey),
            (AuthType::Basic, Some(username), Some(password), _) => Self::Basic(username, password),
            _ => Self::None,
        }
    }

    /// Pick the auth from whichever credentials are configured.
    ///
    /// An explicit `auth_type` wins. Otherwise an API key takes precedence
    /// over a username and password pair, and no credentials means no auth.
    pub fn infer(
        auth_type: Option<AuthType>,
        username: Option<String>,
        password: Option<String>,
        apikey: Option<String>,
    ) -> Self {
        let auth_type = auth_type.unwrap_or(match (&username, &password, &apikey) {
            (_, _, Some(_)) => AuthType::Apikey,
            (Some(_), Some(_), None) => AuthType::Basic,
            _ => AuthType::None,
        });
        Self::new(&auth_type, username, password, apikey)
    }
}

impl std::fmt::Display for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Apikey(_) => write!(f, "Apikey"),
            Self::Basic(_, _) => write!(f, "Basic"),
            Self::None => write!(f, "None"),
        }
    }
}

/// Authentication scheme named by `PLATFORM_AUTH_TYPE`
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AuthType {
    Apikey,
    Basic,
    None,
}

impl FromStr for AuthType {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "apikey" => Ok(Self::Apikey),
            "basic" => Ok(Self::Basic),
            "none" => Ok(Self::None),
            _ => Err(()),
        }
    }
}
