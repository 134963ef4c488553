use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Number of questions in a mock exam; the count selector is ignored in that mode.
pub const MOCK_QUESTION_COUNT: u32 = 100;

/// Mock exam duration: 90 minutes.
pub const MOCK_DURATION_SECS: u32 = 90 * 60;

/// Largest count a single generation request may ask for.
pub const MAX_QUESTION_COUNT: u32 = 100;

/// Counts offered by the setup view for single-block tests.
pub const QUESTION_COUNT_CHOICES: [u32; 4] = [10, 20, 50, 100];

/// Count preselected for single-block tests.
pub const DEFAULT_QUESTION_COUNT: u32 = 20;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScopeError {
    #[error("unknown exam scope `{0}`")]
    UnknownScope(String),

    #[error("question count must be between 1 and {max}, got {count}")]
    InvalidCount { count: u32, max: u32 },
}

//
// ─── BLOCKS ───────────────────────────────────────────────────────────────────
//

/// The four topic blocks of the syllabus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Block {
    StateOrganisation,
    BasicTechnology,
    SystemsDevelopment,
    SystemsAndCommunications,
}

impl Block {
    pub const ALL: [Block; 4] = [
        Block::StateOrganisation,
        Block::BasicTechnology,
        Block::SystemsDevelopment,
        Block::SystemsAndCommunications,
    ];

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Block::StateOrganisation => "BL1",
            Block::BasicTechnology => "BL2",
            Block::SystemsDevelopment => "BL3",
            Block::SystemsAndCommunications => "BL4",
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Block::StateOrganisation => "Block I: State organisation and e-government",
            Block::BasicTechnology => "Block II: Basic technology",
            Block::SystemsDevelopment => "Block III: Systems development",
            Block::SystemsAndCommunications => "Block IV: Systems and communications",
        }
    }

    /// Approximate share of a mock exam, in percent.
    #[must_use]
    pub fn mock_share(self) -> u32 {
        match self {
            Block::StateOrganisation => 15,
            Block::BasicTechnology => 25,
            Block::SystemsDevelopment | Block::SystemsAndCommunications => 30,
        }
    }

    /// Topics the generator is told to draw from.
    #[must_use]
    pub fn syllabus(self) -> &'static str {
        match self {
            Block::StateOrganisation => {
                "Spanish Constitution (1978), Cortes Generales, Government, transparency \
                 (Law 19/2013), equality and LGTBI policy, Digital Agenda, eIDAS, data protection \
                 (GDPR/LOPDGDD), administrative procedure (Law 39/2015), public sector legal \
                 regime (Law 40/2015), civil service statute (TREBEP), National Security Scheme \
                 (ENS), National Interoperability Scheme (ENI)"
            }
            Block::BasicTechnology => {
                "architectures from mobile to supercomputing, cloud, operating systems (Windows, \
                 Linux, mobile), programming languages and paradigms, BI (OLTP/OLAP), SQL and \
                 ANSI-SPARC, microservices and containers, OSI/TCP-IP, HTML/XML/scripting, risk \
                 analysis (Magerit), audit, CRM/IVR, cybersecurity and forensics, software \
                 licences, project management, CMS/SEO"
            }
            Block::SystemsDevelopment => {
                "software life cycle, agile methods, requirements, data modelling (relational, \
                 normalisation), artificial intelligence, DevOps (CI/CD), testing, maintenance, \
                 UML and design patterns, Java/Jakarta EE, .NET, web front end and back end, \
                 quality metrics, accessibility (WCAG/UX), data mining and big data \
                 (Hadoop/NoSQL)"
            }
            Block::SystemsAndCommunications => {
                "OS and database administration, backup and recovery, configuration management \
                 (ITIL), storage (SAN/NAS/virtualisation), data centres (high availability, \
                 BCDR), transmission media, LAN (security, standards), network management (SNMP), \
                 WAN (MPLS/SD-WAN), wireless, perimeter security and VPN, Internet and IoT, \
                 NGN/VoIP, mobile telephony (MDM), videoconferencing"
            }
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

//
// ─── SCOPE ────────────────────────────────────────────────────────────────────
//

/// What a session asks the generator for: one block, or a full timed mock exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExamScope {
    Block(Block),
    #[default]
    Mock,
}

impl ExamScope {
    /// Every selectable scope, in the order the setup view lists them.
    #[must_use]
    pub fn all() -> Vec<ExamScope> {
        Block::ALL
            .into_iter()
            .map(ExamScope::Block)
            .chain(std::iter::once(ExamScope::Mock))
            .collect()
    }

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            ExamScope::Block(block) => block.id(),
            ExamScope::Mock => "MOCK",
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ExamScope::Block(block) => block.name(),
            ExamScope::Mock => "Full mock exam (100 questions, 90 min)",
        }
    }

    #[must_use]
    pub fn is_mock(self) -> bool {
        matches!(self, ExamScope::Mock)
    }
}

impl fmt::Display for ExamScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ExamScope {
    type Err = ScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if wanted.eq_ignore_ascii_case("MOCK") {
            return Ok(ExamScope::Mock);
        }
        Block::ALL
            .into_iter()
            .find(|block| block.id().eq_ignore_ascii_case(wanted))
            .map(ExamScope::Block)
            .ok_or_else(|| ScopeError::UnknownScope(wanted.to_string()))
    }
}

//
// ─── REQUEST ──────────────────────────────────────────────────────────────────
//

/// A resolved generation request: scope plus the count actually sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExamRequest {
    scope: ExamScope,
    count: u32,
}

impl ExamRequest {
    /// Resolve the user's choice. Mock exams always use `MOCK_QUESTION_COUNT`.
    ///
    /// # Errors
    ///
    /// Returns `ScopeError::InvalidCount` for 0 or counts above `MAX_QUESTION_COUNT`.
    pub fn resolve(scope: ExamScope, requested_count: u32) -> Result<Self, ScopeError> {
        let count = if scope.is_mock() {
            MOCK_QUESTION_COUNT
        } else {
            requested_count
        };
        if count == 0 || count > MAX_QUESTION_COUNT {
            return Err(ScopeError::InvalidCount {
                count,
                max: MAX_QUESTION_COUNT,
            });
        }
        Ok(Self { scope, count })
    }

    #[must_use]
    pub fn scope(&self) -> ExamScope {
        self.scope
    }

    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    #[must_use]
    pub fn is_timed(&self) -> bool {
        self.scope.is_mock()
    }

    /// Countdown length for timed requests.
    #[must_use]
    pub fn duration_secs(&self) -> Option<u32> {
        self.is_timed().then_some(MOCK_DURATION_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_forces_the_fixed_count() {
        let request = ExamRequest::resolve(ExamScope::Mock, 10).unwrap();
        assert_eq!(request.count(), MOCK_QUESTION_COUNT);
        assert!(request.is_timed());
        assert_eq!(request.duration_secs(), Some(5400));
    }

    #[test]
    fn block_keeps_the_requested_count() {
        let request = ExamRequest::resolve(ExamScope::Block(Block::BasicTechnology), 50).unwrap();
        assert_eq!(request.count(), 50);
        assert!(!request.is_timed());
        assert_eq!(request.duration_secs(), None);
    }

    #[test]
    fn rejects_out_of_range_counts() {
        let scope = ExamScope::Block(Block::StateOrganisation);
        assert_eq!(
            ExamRequest::resolve(scope, 0).unwrap_err(),
            ScopeError::InvalidCount { count: 0, max: 100 }
        );
        assert!(ExamRequest::resolve(scope, 101).is_err());
    }

    #[test]
    fn scope_parses_ids() {
        assert_eq!("mock".parse::<ExamScope>().unwrap(), ExamScope::Mock);
        assert_eq!(
            "bl3".parse::<ExamScope>().unwrap(),
            ExamScope::Block(Block::SystemsDevelopment)
        );
        assert!("BL9".parse::<ExamScope>().is_err());
    }

    #[test]
    fn mock_shares_cover_the_whole_exam() {
        let total: u32 = Block::ALL.iter().map(|block| block.mock_share()).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn all_scopes_end_with_mock() {
        let scopes = ExamScope::all();
        assert_eq!(scopes.len(), 5);
        assert_eq!(scopes.last(), Some(&ExamScope::Mock));
    }
}
