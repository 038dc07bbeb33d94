/// Priority attached to an event kind, used by the caller when it drains a
/// queue and has to pick which alerts to surface first.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
pub enum Priority {
    /// 0 = highest.
    High,
    Medium,
    Low,
}

/// An event kind that can be logged into an [`EventQueue`].
///
/// [`EventQueue`]: crate::events::EventQueue
pub trait EventKind: Copy + Eq + std::hash::Hash {
    fn priority(&self) -> Priority;
    fn description(&self) -> &'static str;
}

/// Request-side evasion techniques detected while normalizing a URI.
///
/// One variant per documented technique; a variant is logged at most once
/// per session queue, further sightings only bump its count.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ClientEvent {
    AsciiEncoding,
    DoubleDecode,
    UEncode,
    BareByte,
    Base36,
    Utf8Encoding,
    IisUnicode,
    MultiSlash,
    IisBackslash,
    SelfDirTraversal,
    DirTraversal,
    NonRfcChar,
    OversizeDir,
}

impl EventKind for ClientEvent {
    fn priority(&self) -> Priority {
        match self {
            ClientEvent::AsciiEncoding => Priority::Low,
            ClientEvent::DoubleDecode => Priority::High,
            ClientEvent::UEncode => Priority::Medium,
            ClientEvent::BareByte => Priority::High,
            ClientEvent::Base36 => Priority::High,
            ClientEvent::Utf8Encoding => Priority::Low,
            ClientEvent::IisUnicode => Priority::Low,
            ClientEvent::MultiSlash => Priority::Medium,
            ClientEvent::IisBackslash => Priority::Medium,
            ClientEvent::SelfDirTraversal => Priority::High,
            ClientEvent::DirTraversal => Priority::Low,
            ClientEvent::NonRfcChar => Priority::High,
            ClientEvent::OversizeDir => Priority::High,
        }
    }

    fn description(&self) -> &'static str {
        match self {
            ClientEvent::AsciiEncoding => "ascii encoding",
            ClientEvent::DoubleDecode => "double decoding attack",
            ClientEvent::UEncode => "u encoding",
            ClientEvent::BareByte => "bare byte unicode encoding",
            ClientEvent::Base36 => "base36 encoding",
            ClientEvent::Utf8Encoding => "utf-8 encoding",
            ClientEvent::IisUnicode => "iis unicode codepoint encoding",
            ClientEvent::MultiSlash => "multi-slash obfuscation",
            ClientEvent::IisBackslash => "iis backslash evasion",
            ClientEvent::SelfDirTraversal => "self directory traversal",
            ClientEvent::DirTraversal => "directory traversal",
            ClientEvent::NonRfcChar => "non-rfc defined char",
            ClientEvent::OversizeDir => "oversize request-uri directory",
        }
    }
}

/// Events describing the server side of a flow behaving anomalously.
///
/// The normalization engine never raises these itself; the surrounding
/// inspection system appends to the session's anomalous-server queue when
/// it sees HTTP responses from hosts it has no server profile for.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum AnomServerEvent {
    AnomalousServer,
}

impl EventKind for AnomServerEvent {
    fn priority(&self) -> Priority {
        Priority::High
    }

    fn description(&self) -> &'static str {
        "anomalous http server on undefined http port"
    }
}
