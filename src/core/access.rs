use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum AccessError {
    #[error("malformed access record: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInState {
    SignedOut,
    SignedIn(UserIdentity),
}

/// Catalog segments one user may see.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccessRecord {
    pub segments: Vec<String>,
}

/// Stored records carry `access` as either a list or a comma-separated string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AccessField {
    List(Vec<String>),
    Csv(String),
}

#[derive(Debug, Deserialize)]
struct StoredRecord {
    #[serde(default)]
    access: Option<AccessField>,
}

impl From<StoredRecord> for AccessRecord {
    fn from(stored: StoredRecord) -> Self {
        let raw: Vec<String> = match stored.access {
            Some(AccessField::List(list)) => list,
            Some(AccessField::Csv(csv)) => csv.split(',').map(str::to_string).collect(),
            None => Vec::new(),
        };
        let segments = raw
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        AccessRecord { segments }
    }
}

pub trait AccessDirectory {
    fn lookup(&self, email: &str) -> Result<Option<AccessRecord>, AccessError>;
}

/// Access records read from a JSON object keyed by email.
#[derive(Debug, Clone, Default)]
pub struct JsonAccessDirectory {
    records: HashMap<String, AccessRecord>,
}

impl JsonAccessDirectory {
    pub fn from_json(content: &str) -> Result<Self, AccessError> {
        let stored: HashMap<String, StoredRecord> =
            serde_json::from_str(content).map_err(|e| AccessError::Malformed(e.to_string()))?;
        let records = stored
            .into_iter()
            .map(|(email, record)| (email.trim().to_lowercase(), AccessRecord::from(record)))
            .collect();
        Ok(Self { records })
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read access directory at {}: {}", path.display(), e))?;
        let directory = Self::from_json(&content)?;
        log::info!("Loaded {} access records from {}", directory.records.len(), path.display());
        Ok(directory)
    }
}

impl AccessDirectory for JsonAccessDirectory {
    fn lookup(&self, email: &str) -> Result<Option<AccessRecord>, AccessError> {
        Ok(self.records.get(&email.trim().to_lowercase()).cloned())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AccessOutcome {
    SignedOut,
    Granted(Vec<String>),
    NoSegments,
    NotAuthorized,
    LookupFailed(String),
}

impl AccessOutcome {
    pub fn message(&self) -> String {
        match self {
            Self::SignedOut => "Please sign in to see your classes.".to_string(),
            Self::Granted(segments) => format!("Welcome! You have access to: {}", segments.join(", ")),
            Self::NoSegments => "You do not have access to any classes. Please contact administrator.".to_string(),
            Self::NotAuthorized => "Your email is not authorized. Please contact administrator.".to_string(),
            Self::LookupFailed(_) => "Error verifying access. Please try again.".to_string(),
        }
    }

    pub fn segments(&self) -> Option<&[String]> {
        match self {
            Self::Granted(segments) => Some(segments),
            _ => None,
        }
    }
}

/// Turns sign-in changes into an access decision for catalog filtering.
#[derive(Debug, Clone)]
pub struct AccessGate {
    state: SignInState,
    outcome: AccessOutcome,
}

impl Default for AccessGate {
    fn default() -> Self {
        Self {
            state: SignInState::SignedOut,
            outcome: AccessOutcome::SignedOut,
        }
    }
}

impl AccessGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, state: SignInState, directory: &dyn AccessDirectory) -> &AccessOutcome {
        self.outcome = match &state {
            SignInState::SignedOut => {
                log::info!("User signed out");
                AccessOutcome::SignedOut
            }
            SignInState::SignedIn(user) => match directory.lookup(&user.email) {
                Ok(Some(record)) if record.segments.is_empty() => {
                    log::warn!("{} has an access record with no segments", user.email);
                    AccessOutcome::NoSegments
                }
                Ok(Some(record)) => {
                    log::info!("{} has access to: {:?}", user.email, record.segments);
                    AccessOutcome::Granted(record.segments)
                }
                Ok(None) => {
                    log::warn!("{} is not in the access directory", user.email);
                    AccessOutcome::NotAuthorized
                }
                Err(e) => {
                    log::error!("Error checking access for {}: {}", user.email, e);
                    AccessOutcome::LookupFailed(e.to_string())
                }
            },
        };
        self.state = state;
        &self.outcome
    }

    pub fn state(&self) -> &SignInState {
        &self.state
    }

    pub fn outcome(&self) -> &AccessOutcome {
        &self.outcome
    }
}
