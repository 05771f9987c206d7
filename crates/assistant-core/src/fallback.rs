//! Scripted answers used when the text generator cannot be reached.
//!
//! Both tables are plain data: a category (or topic) with the keywords that
//! select it. A keyword matches at the start of a word, so `hot` does not
//! fire inside "photos". When several keywords match, the longest one wins
//! and ties go to the earlier table entry.

use serde::Serialize;

use crate::diagnosis::{Diagnosis, Difficulty, IssueReport};

/// Problem categories with a hand-written troubleshooting script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackCategory {
    BlueScreen,
    WaterDamage,
    DataRecovery,
    WontBoot,
    Battery,
    Screen,
    Overheating,
    Malware,
    Network,
    SlowPerformance,
}

/// Keywords for each category, checked against the lower-cased issue text.
pub const CATEGORY_KEYWORDS: &[(FallbackCategory, &[&str])] = &[
    (
        FallbackCategory::BlueScreen,
        &["blue screen", "bsod", "stop code", "crash dump"],
    ),
    (
        FallbackCategory::WaterDamage,
        &["water", "spill", "liquid", "coffee", "wet", "dropped in"],
    ),
    (
        FallbackCategory::DataRecovery,
        &["recover", "deleted", "lost files", "lost data", "corrupt", "data recovery"],
    ),
    (
        FallbackCategory::WontBoot,
        &["won't boot", "wont boot", "won't start", "won't turn on", "no power", "dead", "boot loop"],
    ),
    (
        FallbackCategory::Battery,
        &["battery", "charging", "won't charge", "charger", "drains"],
    ),
    (
        FallbackCategory::Screen,
        &["screen", "display", "cracked", "flicker", "dead pixel", "lcd"],
    ),
    (
        FallbackCategory::Overheating,
        &["overheat", "hot", "fan noise", "loud fan", "thermal", "shuts down"],
    ),
    (
        FallbackCategory::Malware,
        &["virus", "malware", "pop-up", "popup", "ransomware", "hacked", "adware"],
    ),
    (
        FallbackCategory::Network,
        &["wifi", "wi-fi", "hotspot", "internet", "network", "ethernet", "bluetooth", "connection"],
    ),
    (
        FallbackCategory::SlowPerformance,
        &["slow", "lag", "freez", "sluggish", "takes forever", "hangs"],
    ),
];

impl FallbackCategory {
    /// Category of the longest keyword found in `text`.
    pub fn classify(text: &str) -> Option<FallbackCategory> {
        best_match(CATEGORY_KEYWORDS, text)
    }

    /// Scripted diagnosis for this category.
    pub fn diagnosis(&self) -> Diagnosis {
        match self {
            FallbackCategory::BlueScreen => script(
                "Blue screen errors usually point to a faulty driver, failing RAM or a corrupted system update.",
                70,
                &[
                    "Write down the stop code shown on the blue screen.",
                    "Restart in Safe Mode and roll back any recently installed drivers or updates.",
                    "Run Windows Memory Diagnostic to check the RAM.",
                    "Run `sfc /scannow` from an administrator command prompt.",
                    "If the crashes continue, bring the device in for hardware testing.",
                ],
                false,
                "1-2 hours",
                Difficulty::Medium,
            ),
            FallbackCategory::WaterDamage => script(
                "Liquid exposure can short the logic board and corrode connectors over the following days.",
                85,
                &[
                    "Power the device off immediately and do not turn it back on.",
                    "Unplug the charger and remove the battery if it is removable.",
                    "Wipe off visible liquid and leave the device open side down to drain.",
                    "Do not use rice or a hair dryer.",
                    "Bring the device in as soon as possible for a professional cleaning.",
                ],
                true,
                "2-5 days",
                Difficulty::Hard,
            ),
            FallbackCategory::DataRecovery => script(
                "Lost or corrupted files can often be recovered if the drive is not written to further.",
                65,
                &[
                    "Stop using the affected drive to avoid overwriting recoverable data.",
                    "Check the recycle bin, cloud sync history and any backups.",
                    "Listen for clicking or grinding noises, which indicate physical drive failure.",
                    "Bring the drive in for recovery rather than running repair tools on it.",
                ],
                true,
                "1-3 days",
                Difficulty::Hard,
            ),
            FallbackCategory::WontBoot => script(
                "A device that will not start usually has a power delivery, battery or storage fault.",
                60,
                &[
                    "Try a different outlet and a known-good charger.",
                    "Hold the power button for 30 seconds, then try to start normally.",
                    "Disconnect all external devices and try again.",
                    "Note any lights, beeps or fan activity when pressing power.",
                    "If nothing changes, bring the device in for a power diagnostic.",
                ],
                true,
                "1-2 days",
                Difficulty::Hard,
            ),
            FallbackCategory::Battery => script(
                "The battery may be worn out, or the charger or charging port may be faulty.",
                75,
                &[
                    "Try a different charger and cable that are known to work.",
                    "Inspect the charging port for lint or debris and clean it gently.",
                    "Check the battery health report in the system settings.",
                    "Close apps running in the background that drain power.",
                    "If the battery health is low, book a battery replacement.",
                ],
                false,
                "30 minutes - 1 hour",
                Difficulty::Easy,
            ),
            FallbackCategory::Screen => script(
                "Screen issues come from physical damage, a loose display cable or a graphics driver problem.",
                70,
                &[
                    "Connect an external monitor to see whether the problem follows the display.",
                    "Update or reinstall the graphics driver.",
                    "Check for cracks or pressure marks on the panel.",
                    "If the panel is cracked or the external monitor works fine, book a screen repair.",
                ],
                false,
                "1-2 hours",
                Difficulty::Medium,
            ),
            FallbackCategory::Overheating => script(
                "Overheating is usually caused by dust build-up, dried thermal paste or a failing fan.",
                75,
                &[
                    "Use the device on a hard, flat surface so the vents are not blocked.",
                    "Blow compressed air through the vents to clear dust.",
                    "Check the task manager for processes using a lot of CPU.",
                    "If it still runs hot, book a cleaning and thermal paste replacement.",
                ],
                false,
                "1 hour",
                Difficulty::Medium,
            ),
            FallbackCategory::Malware => script(
                "Unexpected pop-ups and behaviour changes are typical signs of malware or adware.",
                70,
                &[
                    "Disconnect from the internet to stop further damage.",
                    "Run a full scan with your antivirus software.",
                    "Uninstall programs and browser extensions you do not recognise.",
                    "Change important passwords from a different, clean device.",
                    "Bring the device in for a full malware removal if the problem persists.",
                ],
                false,
                "1-3 hours",
                Difficulty::Medium,
            ),
            FallbackCategory::Network => script(
                "Connection problems are usually caused by router settings, drivers or interference.",
                65,
                &[
                    "Restart the router and the device.",
                    "Forget the network and reconnect with the password.",
                    "Check whether other devices can connect to the same network.",
                    "Update the network adapter driver.",
                    "Run the built-in network troubleshooter.",
                ],
                false,
                "30 minutes",
                Difficulty::Easy,
            ),
            FallbackCategory::SlowPerformance => script(
                "Slow performance is often caused by startup programs, low disk space or an ageing hard drive.",
                70,
                &[
                    "Disable unnecessary startup programs.",
                    "Free up disk space so at least 15% of the drive is empty.",
                    "Install pending system updates.",
                    "Scan for malware.",
                    "Consider an SSD or RAM upgrade if the device is older.",
                ],
                false,
                "1-2 hours",
                Difficulty::Easy,
            ),
        }
    }
}

fn script(
    diagnosis: &str,
    confidence: u8,
    steps: &[&str],
    escalate: bool,
    estimated_time: &str,
    difficulty: Difficulty,
) -> Diagnosis {
    Diagnosis {
        diagnosis: diagnosis.to_string(),
        confidence,
        steps: steps.iter().map(|s| s.to_string()).collect(),
        escalate,
        estimated_time: estimated_time.to_string(),
        difficulty,
    }
}

/// Diagnosis for a report that matches no category.
pub fn generic_diagnosis(report: &IssueReport) -> Diagnosis {
    Diagnosis {
        diagnosis: format!(
            "We couldn't pinpoint the problem with your {} from the description alone.",
            report.device_label()
        ),
        confidence: 30,
        steps: vec![
            "Restart the device and check whether the problem comes back.".to_string(),
            "Install any pending system and driver updates.".to_string(),
            "Note when the problem happens and any error messages shown.".to_string(),
            "Book a diagnostic appointment so a technician can take a look.".to_string(),
        ],
        escalate: true,
        estimated_time: "Depends on diagnosis".to_string(),
        difficulty: Difficulty::Medium,
    }
}

/// Entry owning the longest keyword that starts a word in `text`.
fn best_match<T: Copy>(table: &[(T, &[&str])], text: &str) -> Option<T> {
    let text = text.to_lowercase();
    let mut best: Option<(usize, T)> = None;
    for (entry, keywords) in table {
        for keyword in keywords.iter().filter(|k| starts_word(&text, k)) {
            if best.map_or(true, |(len, _)| keyword.len() > len) {
                best = Some((keyword.len(), *entry));
            }
        }
    }
    best.map(|(_, entry)| entry)
}

fn starts_word(text: &str, keyword: &str) -> bool {
    text.match_indices(keyword).any(|(at, _)| {
        text[..at]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric())
    })
}

/// Scripted diagnosis for `report`, with the category that produced it.
pub fn fallback_diagnosis(report: &IssueReport) -> (Diagnosis, Option<FallbackCategory>) {
    match FallbackCategory::classify(&report.description) {
        Some(category) => (category.diagnosis(), Some(category)),
        None => (generic_diagnosis(report), None),
    }
}

/// Chat questions with a scripted reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChatTopic {
    Pricing,
    Hours,
    Booking,
    Location,
    Turnaround,
    DataSafety,
}

/// Keywords for each chat topic.
pub const TOPIC_KEYWORDS: &[(ChatTopic, &[&str])] = &[
    (
        ChatTopic::Pricing,
        &["price", "cost", "how much", "quote", "fee", "charge"],
    ),
    (
        ChatTopic::Hours,
        &["hours", "open", "close", "weekend", "sunday", "saturday"],
    ),
    (
        ChatTopic::Booking,
        &["book", "appointment", "schedule", "reserve"],
    ),
    (
        ChatTopic::Location,
        &["where", "address", "location", "directions", "parking"],
    ),
    (
        ChatTopic::Turnaround,
        &["how long", "turnaround", "when will", "ready", "status"],
    ),
    (
        ChatTopic::DataSafety,
        &["data", "privacy", "files safe", "backup", "personal"],
    ),
];

/// Reply used when no topic matches.
pub const GENERIC_CHAT_REPLY: &str = "Thanks for reaching out! Our assistant is briefly unavailable. \
You can describe your issue on the troubleshooting page, book a diagnostic appointment, \
or call the shop and a technician will help you.";

impl ChatTopic {
    /// Topic of the longest keyword found in `text`.
    pub fn classify(text: &str) -> Option<ChatTopic> {
        best_match(TOPIC_KEYWORDS, text)
    }

    /// Scripted reply for this topic.
    pub fn reply(&self) -> &'static str {
        match self {
            ChatTopic::Pricing => "Diagnostics are free with any repair. Most repairs are quoted after a diagnosis, and we always confirm the price with you before starting work.",
            ChatTopic::Hours => "We're open Monday to Friday 9:00-18:00 and Saturday 10:00-16:00. We're closed on Sundays.",
            ChatTopic::Booking => "You can book an appointment from the booking page. Pick a service and a time slot, and you'll receive a tracking ID to follow your repair.",
            ChatTopic::Location => "You'll find our address and directions on the contact page. Street parking is available nearby.",
            ChatTopic::Turnaround => "Most repairs are finished within 1-3 business days. Use your tracking ID on the tracking page to see the current status.",
            ChatTopic::DataSafety => "Your data stays private. We only access what's needed for the repair, and we recommend backing up before drop-off whenever possible.",
        }
    }
}

/// Scripted chat reply for `text`, with the topic that produced it.
pub fn fallback_chat(text: &str) -> (String, Option<ChatTopic>) {
    match ChatTopic::classify(text) {
        Some(topic) => (topic.reply().to_string(), Some(topic)),
        None => (GENERIC_CHAT_REPLY.to_string(), None),
    }
}
