//! Locally simulated AI tasks.
//!
//! Every task is deterministic: lexicon lookups, sentence splitting and a
//! small EN→FR dictionary stand in for a model. Admin tasks that operate on
//! uploaded files are refused here and pointed at their upload endpoints.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::notify::{NotifyMethod, Notifier};

const SUMMARY_SENTENCES: usize = 2;
const PASS_MARK: f64 = 60.0;
const REMINDER_BODY: &str = "Reminder: please review your upcoming deadlines and pending tasks.";

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "happy", "love", "awesome", "fantastic", "nice", "helpful",
    "amazing", "wonderful", "like", "enjoy", "enjoyed", "clear", "best", "thanks", "useful",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "sad", "hate", "poor", "horrible", "boring", "confusing", "worst",
    "difficult", "angry", "disappointed", "slow", "unclear", "broken", "late", "useless",
];

const CATEGORIES: &[(&str, &[&str])] = &[
    ("complaint", &["complaint", "broken", "refund", "problem", "issue", "terrible", "disappointed", "wrong"]),
    ("inquiry", &["how", "what", "when", "where", "why", "which", "question", "wondering"]),
    ("request", &["please", "request", "need", "could", "would", "require", "want"]),
    ("praise", &["thanks", "thank", "great", "excellent", "love", "appreciate", "awesome"]),
    ("scheduling", &["meeting", "schedule", "deadline", "tomorrow", "calendar", "appointment", "reschedule"]),
];

const ENTITY_STOPWORDS: &[&str] = &[
    "The", "A", "An", "I", "This", "That", "These", "Those", "It", "We", "They", "He", "She",
    "You", "Our", "My", "In", "On", "At", "If", "Please", "Hello", "Hi", "Dear", "Thanks",
];

const EN_FR: &[(&str, &str)] = &[
    ("hello", "bonjour"), ("goodbye", "au revoir"), ("thank", "merci"), ("thanks", "merci"),
    ("please", "s'il vous plaît"), ("yes", "oui"), ("no", "non"), ("the", "le"), ("a", "un"),
    ("and", "et"), ("or", "ou"), ("is", "est"), ("are", "sont"), ("be", "être"), ("will", "va"),
    ("i", "je"), ("you", "vous"), ("we", "nous"), ("they", "ils"), ("our", "notre"),
    ("your", "votre"), ("all", "tous"), ("students", "étudiants"), ("student", "étudiant"),
    ("teacher", "professeur"), ("class", "classe"), ("classes", "classes"), ("school", "école"),
    ("exam", "examen"), ("exams", "examens"), ("course", "cours"), ("lesson", "leçon"),
    ("homework", "devoirs"), ("meeting", "réunion"), ("notice", "avis"), ("today", "aujourd'hui"),
    ("tomorrow", "demain"), ("week", "semaine"), ("month", "mois"), ("day", "jour"),
    ("monday", "lundi"), ("tuesday", "mardi"), ("wednesday", "mercredi"), ("thursday", "jeudi"),
    ("friday", "vendredi"), ("saturday", "samedi"), ("sunday", "dimanche"), ("good", "bon"),
    ("bad", "mauvais"), ("new", "nouveau"), ("important", "important"), ("deadline", "échéance"),
    ("report", "rapport"), ("room", "salle"), ("library", "bibliothèque"), ("closed", "fermé"),
    ("open", "ouvert"), ("on", "le"), ("in", "dans"), ("at", "à"), ("to", "à"), ("of", "de"),
    ("for", "pour"), ("with", "avec"), ("not", "pas"), ("submit", "soumettre"),
    ("attend", "assister"), ("cancelled", "annulé"), ("holiday", "vacances"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserAiTask {
    #[serde(rename = "Sentiment Analysis")]
    SentimentAnalysis,
    #[serde(rename = "Summarization")]
    Summarization,
    #[serde(rename = "Named Entity Recognition")]
    NamedEntityRecognition,
    #[serde(rename = "Text Classification")]
    TextClassification,
    #[serde(rename = "Translation (EN→FR)")]
    TranslationEnFr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdminAiTask {
    #[serde(rename = "Calculate Student Attendance")]
    CalculateStudentAttendance,
    #[serde(rename = "Generate Monthly Report")]
    GenerateMonthlyReport,
    #[serde(rename = "Schedule Alert Notifications")]
    ScheduleAlertNotifications,
    #[serde(rename = "Analyze Student Performance")]
    AnalyzeStudentPerformance,
    #[serde(rename = "Detect Irregular Attendance")]
    DetectIrregularAttendance,
    #[serde(rename = "Send Reminder Emails")]
    SendReminderEmails,
    #[serde(rename = "Summarize Class Feedback")]
    SummarizeClassFeedback,
    #[serde(rename = "Translate Academic Notices")]
    TranslateAcademicNotices,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlaggedStudent {
    pub student: String,
    pub attendance_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AiOutput {
    Sentiment {
        label: SentimentLabel,
        score: f64,
        positive_terms: Vec<String>,
        negative_terms: Vec<String>,
    },
    Summary {
        summary: String,
        sentences: usize,
    },
    Entities {
        entities: Vec<String>,
    },
    Classification {
        category: String,
        matched_keywords: Vec<String>,
    },
    Translation {
        source_language: String,
        target_language: String,
        translated_text: String,
        untranslated: Vec<String>,
    },
    Report {
        lines: usize,
        words: usize,
        characters: usize,
        summary: String,
    },
    Performance {
        count: usize,
        average: f64,
        highest: f64,
        lowest: f64,
        passing: usize,
    },
    IrregularAttendance {
        threshold: f64,
        checked: usize,
        flagged: Vec<FlaggedStudent>,
    },
    Reminders {
        sent_to: Vec<String>,
        skipped: Vec<String>,
    },
    FeedbackSummary {
        summary: String,
        sentiment: SentimentLabel,
        score: f64,
    },
}

pub fn run_user_task(task: UserAiTask, text: &str) -> Result<AiOutput, ApiError> {
    let text = require_text(text)?;
    Ok(match task {
        UserAiTask::SentimentAnalysis => sentiment(text),
        UserAiTask::Summarization => summarize(text),
        UserAiTask::NamedEntityRecognition => AiOutput::Entities {
            entities: entities(text),
        },
        UserAiTask::TextClassification => classify(text),
        UserAiTask::TranslationEnFr => translate(text),
    })
}

pub fn run_admin_task(
    task: AdminAiTask,
    text: &str,
    notifier: &dyn Notifier,
    attendance_threshold: f64,
) -> Result<AiOutput, ApiError> {
    match task {
        AdminAiTask::CalculateStudentAttendance => Err(ApiError::BadRequest(
            "Calculate Student Attendance needs a CSV upload; use POST /admin/upload-attendance".into(),
        )),
        AdminAiTask::ScheduleAlertNotifications => Err(ApiError::BadRequest(
            "Schedule Alert Notifications needs a CSV upload; use POST /admin/upload-schedule".into(),
        )),
        AdminAiTask::GenerateMonthlyReport => {
            let text = require_text(text)?;
            let summary = match summarize(text) {
                AiOutput::Summary { summary, .. } => summary,
                _ => String::new(),
            };
            Ok(AiOutput::Report {
                lines: text.lines().filter(|l| !l.trim().is_empty()).count(),
                words: text.split_whitespace().count(),
                characters: text.chars().count(),
                summary,
            })
        }
        AdminAiTask::AnalyzeStudentPerformance => performance(require_text(text)?),
        AdminAiTask::DetectIrregularAttendance => {
            irregular_attendance(require_text(text)?, attendance_threshold)
        }
        AdminAiTask::SendReminderEmails => reminders(require_text(text)?, notifier),
        AdminAiTask::SummarizeClassFeedback => {
            let text = require_text(text)?;
            let (label, score) = match sentiment(text) {
                AiOutput::Sentiment { label, score, .. } => (label, score),
                _ => (SentimentLabel::Neutral, 0.0),
            };
            let summary = match summarize(text) {
                AiOutput::Summary { summary, .. } => summary,
                _ => String::new(),
            };
            Ok(AiOutput::FeedbackSummary {
                summary,
                sentiment: label,
                score,
            })
        }
        AdminAiTask::TranslateAcademicNotices => Ok(translate(require_text(text)?)),
    }
}

fn require_text(text: &str) -> Result<&str, ApiError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ApiError::BadRequest("Input text must not be empty".into()));
    }
    Ok(text)
}

fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn push_unique(list: &mut Vec<String>, item: &str) {
    if !list.iter().any(|existing| existing == item) {
        list.push(item.to_string());
    }
}

fn sentiment(text: &str) -> AiOutput {
    let mut positive_terms = Vec::new();
    let mut negative_terms = Vec::new();
    let (mut positive, mut negative) = (0usize, 0usize);

    for word in words(text) {
        if POSITIVE_WORDS.contains(&word.as_str()) {
            positive += 1;
            push_unique(&mut positive_terms, &word);
        } else if NEGATIVE_WORDS.contains(&word.as_str()) {
            negative += 1;
            push_unique(&mut negative_terms, &word);
        }
    }

    let score = if positive + negative == 0 {
        0.0
    } else {
        round2((positive as f64 - negative as f64) / (positive + negative) as f64)
    };
    let label = if score > 0.0 {
        SentimentLabel::Positive
    } else if score < 0.0 {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    };

    AiOutput::Sentiment {
        label,
        score,
        positive_terms,
        negative_terms,
    }
}

fn sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    for (idx, c) in text.char_indices() {
        if matches!(c, '.' | '!' | '?') {
            let end = idx + c.len_utf8();
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                out.push(sentence);
            }
            start = end;
        }
    }
    let rest = text[start..].trim();
    if !rest.is_empty() {
        out.push(rest);
    }
    out
}

fn summarize(text: &str) -> AiOutput {
    let all = sentences(text);
    AiOutput::Summary {
        summary: all
            .iter()
            .take(SUMMARY_SENTENCES)
            .copied()
            .collect::<Vec<_>>()
            .join(" "),
        sentences: all.len(),
    }
}

fn entities(text: &str) -> Vec<String> {
    fn flush(current: &mut Vec<&str>, found: &mut Vec<String>) {
        if !current.is_empty() {
            push_unique(found, &current.join(" "));
            current.clear();
        }
    }

    let mut found = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for raw in text.split_whitespace() {
        let word = raw.trim_matches(|c: char| !c.is_alphanumeric());
        let capitalized = word.chars().next().map_or(false, char::is_uppercase);
        if capitalized && !(current.is_empty() && ENTITY_STOPWORDS.contains(&word)) {
            current.push(word);
        } else {
            flush(&mut current, &mut found);
        }
        if raw.ends_with(|c: char| matches!(c, '.' | ',' | ';' | ':' | '!' | '?')) {
            flush(&mut current, &mut found);
        }
    }
    flush(&mut current, &mut found);
    found
}

fn classify(text: &str) -> AiOutput {
    let tokens = words(text);
    let mut best: Option<(&str, Vec<String>)> = None;

    for (category, keywords) in CATEGORIES {
        let mut matched = Vec::new();
        for token in &tokens {
            if keywords.contains(&token.as_str()) {
                push_unique(&mut matched, token);
            }
        }
        let better = match &best {
            Some((_, current)) => matched.len() > current.len(),
            None => !matched.is_empty(),
        };
        if better {
            best = Some((*category, matched));
        }
    }

    let (category, matched_keywords) = best.unwrap_or(("general", Vec::new()));
    AiOutput::Classification {
        category: category.to_string(),
        matched_keywords,
    }
}

fn translate_word(word: &str) -> Option<&'static str> {
    let lower = word.to_lowercase();
    EN_FR
        .iter()
        .find(|(en, _)| *en == lower)
        .map(|(_, fr)| *fr)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn translate(text: &str) -> AiOutput {
    let mut untranslated = Vec::new();
    let translated: Vec<String> = text
        .split_whitespace()
        .map(|raw| {
            let core = raw.trim_matches(|c: char| !c.is_alphanumeric());
            if core.is_empty() {
                return raw.to_string();
            }
            let start = raw.find(core).unwrap_or(0);
            let (prefix, suffix) = (&raw[..start], &raw[start + core.len()..]);
            let word = match translate_word(core) {
                Some(fr) if core.chars().next().map_or(false, char::is_uppercase) => capitalize(fr),
                Some(fr) => fr.to_string(),
                None => {
                    push_unique(&mut untranslated, &core.to_lowercase());
                    core.to_string()
                }
            };
            format!("{}{}{}", prefix, word, suffix)
        })
        .collect();

    AiOutput::Translation {
        source_language: "en".into(),
        target_language: "fr".into(),
        translated_text: translated.join(" "),
        untranslated,
    }
}

fn parse_number(token: &str) -> Option<f64> {
    let value = token
        .trim_end_matches('%')
        .trim_end_matches('.')
        .parse::<f64>()
        .ok()?;
    value.is_finite().then_some(value)
}

fn performance(text: &str) -> Result<AiOutput, ApiError> {
    let scores: Vec<f64> = text
        .split(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | ':' | '='))
        .filter_map(parse_number)
        .collect();
    if scores.is_empty() {
        return Err(ApiError::BadRequest("No numeric scores found in input".into()));
    }

    let total: f64 = scores.iter().sum();
    let highest = scores.iter().copied().fold(f64::MIN, f64::max);
    let lowest = scores.iter().copied().fold(f64::MAX, f64::min);
    Ok(AiOutput::Performance {
        count: scores.len(),
        average: round2(total / scores.len() as f64),
        highest,
        lowest,
        passing: scores.iter().filter(|s| **s >= PASS_MARK).count(),
    })
}

fn parse_rate_line(line: &str) -> Option<FlaggedStudent> {
    let (name, value) = line
        .trim()
        .rsplit_once(|c: char| c.is_whitespace() || matches!(c, ':' | ','))?;
    let rate = parse_number(value.trim())?;
    let name = name.trim().trim_end_matches(|c: char| matches!(c, ':' | ',')).trim();
    if name.is_empty() {
        return None;
    }
    Some(FlaggedStudent {
        student: name.to_string(),
        attendance_rate: rate,
    })
}

fn irregular_attendance(text: &str, threshold: f64) -> Result<AiOutput, ApiError> {
    let parsed: Vec<FlaggedStudent> = text.lines().filter_map(parse_rate_line).collect();
    if parsed.is_empty() {
        return Err(ApiError::BadRequest(
            "Expected one student per line, e.g. 'Ana: 82%'".into(),
        ));
    }
    let checked = parsed.len();
    let flagged = parsed
        .into_iter()
        .filter(|s| s.attendance_rate < threshold)
        .collect();
    Ok(AiOutput::IrregularAttendance {
        threshold,
        checked,
        flagged,
    })
}

fn is_email(candidate: &str) -> bool {
    match candidate.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

fn reminders(text: &str, notifier: &dyn Notifier) -> Result<AiOutput, ApiError> {
    let mut sent_to = Vec::new();
    let mut skipped = Vec::new();
    for candidate in text
        .split(|c: char| c.is_whitespace() || matches!(c, ',' | ';'))
        .filter(|c| !c.is_empty())
    {
        if is_email(candidate) {
            notifier.send(NotifyMethod::Email, candidate, REMINDER_BODY)?;
            push_unique(&mut sent_to, candidate);
        } else {
            push_unique(&mut skipped, candidate);
        }
    }
    Ok(AiOutput::Reminders { sent_to, skipped })
}
