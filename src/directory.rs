//! Static agent directory.
//!
//! The orchestrator reports agents by identifier only; display names and
//! icons are client-side configuration. Unknown identifiers degrade to the
//! identifier itself and a generic robot icon rather than failing.

/// Icon category for an agent, rendered as a terminal glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentIcon {
    /// Email handling.
    Envelope,
    /// Document processing.
    Document,
    /// Scheduling and calendars.
    Calendar,
    /// Data analysis and reporting.
    Chart,
    /// Knowledge-base Q&A.
    Brain,
    /// File management.
    Folder,
    /// Fallback for unknown agents.
    Robot,
}

impl AgentIcon {
    /// Returns the glyph used when listing agents.
    pub fn glyph(&self) -> &'static str {
        match self {
            AgentIcon::Envelope => "📧",
            AgentIcon::Document => "📄",
            AgentIcon::Calendar => "📅",
            AgentIcon::Chart => "📊",
            AgentIcon::Brain => "💡",
            AgentIcon::Folder => "📁",
            AgentIcon::Robot => "🤖",
        }
    }
}

/// Known agents: identifier, display name, icon category.
const AGENTS: &[(&str, &str, AgentIcon)] = &[
    ("email", "邮件智能体", AgentIcon::Envelope),
    ("doc", "文档智能体", AgentIcon::Document),
    ("schedule", "日程智能体", AgentIcon::Calendar),
    ("data", "数据分析智能体", AgentIcon::Chart),
    ("knowledge", "知识问答智能体", AgentIcon::Brain),
    ("file", "文件管理智能体", AgentIcon::Folder),
];

fn lookup(agent: &str) -> Option<&'static (&'static str, &'static str, AgentIcon)> {
    AGENTS
        .iter()
        .find(|(id, _, _)| id.eq_ignore_ascii_case(agent))
}

/// Returns the display name for an agent identifier, falling back to the
/// identifier itself when unknown.
pub fn display_name(agent: &str) -> &str {
    lookup(agent).map(|(_, name, _)| *name).unwrap_or(agent)
}

/// Returns the icon category for an agent identifier, falling back to the
/// robot icon when unknown.
pub fn icon(agent: &str) -> AgentIcon {
    lookup(agent).map(|(_, _, icon)| *icon).unwrap_or(AgentIcon::Robot)
}
