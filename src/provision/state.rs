/// Progress of a single provisioning run.
///
/// States only move forward; `Failed` is terminal and reachable from every
/// non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionState {
    Idle,
    ValidatingInput,
    ConnectorCreated,
    CredentialCreated,
    Linked,
    RunTriggered,
    Failed,
}

impl ProvisionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::RunTriggered | Self::Failed)
    }

    /// The state following this one on the success path
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Idle => Some(Self::ValidatingInput),
            Self::ValidatingInput => Some(Self::ConnectorCreated),
            Self::ConnectorCreated => Some(Self::CredentialCreated),
            Self::CredentialCreated => Some(Self::Linked),
            Self::Linked => Some(Self::RunTriggered),
            Self::RunTriggered | Self::Failed => None,
        }
    }

    pub fn can_transition_to(&self, to: Self) -> bool {
        match to {
            Self::Failed => !self.is_terminal(),
            _ => self.next() == Some(to),
        }
    }

    /// Move to `to`, logging the transition.
    ///
    /// Panics in debug builds on a transition the workflow never makes.
    pub(crate) fn advance(&mut self, to: Self) {
        debug_assert!(
            self.can_transition_to(to),
            "invalid provisioning transition {} -> {}",
            self,
            to
        );
        log::debug!("Provisioning state: {} -> {}", self, to);
        *self = to;
    }
}

impl std::fmt::Display for ProvisionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::ValidatingInput => "validating input",
            Self::ConnectorCreated => "connector created",
            Self::CredentialCreated => "credential created",
            Self::Linked => "linked",
            Self::RunTriggered => "run triggered",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}
