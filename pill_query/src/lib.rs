//! 搜索语法：第一版只做 `[-]operator:operand` + 自由文本。
//!
//! - 空白切分，双引号内的空白不切分
//! - 不认识的 `xxx:yyy`（例如 URL）按自由文本处理
//! - 相邻的自由文本合并成一个 `search` 条件，位置保持不变

use pill_core::{model::Term, tokenizer::Tokenizer};

/// 认识的 operator（规范名）。
const OPERATORS: [&str; 13] = [
    "channel",
    "channels",
    "dm",
    "dm-including",
    "has",
    "id",
    "in",
    "is",
    "near",
    "search",
    "sender",
    "topic",
    "with",
];

/// 旧名 -> 规范名。
const ALIASES: [(&str, &str); 5] = [
    ("from", "sender"),
    ("group-pm-with", "dm-including"),
    ("pm-with", "dm"),
    ("stream", "channel"),
    ("subject", "topic"),
];

#[derive(Debug, Clone, Default)]
pub struct QueryTokenizer;

impl QueryTokenizer {
    pub fn new() -> Self {
        Self
    }

    fn canonical_operator(operator: &str) -> Option<String> {
        let operator = operator.to_ascii_lowercase();
        if let Some((_, canonical)) = ALIASES.iter().find(|(alias, _)| *alias == operator) {
            return Some((*canonical).to_string());
        }
        OPERATORS.contains(&operator.as_str()).then_some(operator)
    }

    /// `[-]operator:operand`；operator 不认识时返回 `None`。
    fn parse_operator_token(token: &str) -> Option<Term> {
        let (negated, body) = match token.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, token),
        };
        let (operator, operand) = body.split_once(':')?;
        if operator.is_empty() || !operator.bytes().all(|b| b.is_ascii_alphabetic() || b == b'-') {
            return None;
        }
        let operator = Self::canonical_operator(operator)?;
        Some(Term {
            operator,
            operand: decode_operand(operand),
            negated,
        })
    }
}

impl Tokenizer for QueryTokenizer {
    fn parse(&self, text: &str) -> Vec<Term> {
        let mut terms: Vec<Term> = Vec::new();
        let mut words: Vec<String> = Vec::new();

        for token in split_tokens(text) {
            match Self::parse_operator_token(&token) {
                Some(term) => {
                    flush_search(&mut words, &mut terms);
                    terms.push(term);
                }
                None => words.push(token),
            }
        }
        flush_search(&mut words, &mut terms);
        tracing::trace!("parsed {text:?} into {} terms", terms.len());
        terms
    }

    fn unparse(&self, terms: &[Term]) -> String {
        let parts: Vec<String> = terms
            .iter()
            .map(|term| {
                if term.operator == "search" {
                    return term.operand.clone();
                }
                let sign: &str = if term.negated { "-" } else { "" };
                format!("{sign}{}:{}", term.operator, encode_operand(&term.operand))
            })
            .collect();
        parts.join(" ")
    }

    fn describe(&self, terms: &[Term]) -> String {
        if terms.is_empty() {
            return "all messages".to_string();
        }
        let parts: Vec<String> = terms.iter().map(describe_term).collect();
        parts.join(", ")
    }
}

fn flush_search(words: &mut Vec<String>, terms: &mut Vec<Term>) {
    if words.is_empty() {
        return;
    }
    terms.push(Term::new("search", words.join(" ")));
    words.clear();
}

fn split_tokens(text: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut cur = String::new();
    let mut quoted = false;
    for ch in text.chars() {
        if ch == '"' {
            quoted = !quoted;
            cur.push(ch);
        } else if ch.is_whitespace() && !quoted {
            if !cur.is_empty() {
                out.push(std::mem::take(&mut cur));
            }
        } else {
            cur.push(ch);
        }
    }
    if !cur.is_empty() {
        out.push(cur);
    }
    out
}

/// `+` -> 空格，`%XX` 解码，去掉双引号。
fn decode_operand(operand: &str) -> String {
    let operand: String = operand.replace('"', "").replace('+', " ");
    let bytes = operand.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
            if let Some(b) = hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                out.push(b);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// 空格写成 `+`；其余会被 `split_tokens` 当作分隔的空白按 UTF-8 字节写成 `%XX`。
fn encode_operand(operand: &str) -> String {
    let mut out = String::with_capacity(operand.len());
    for ch in operand.chars() {
        match ch {
            '%' => out.push_str("%25"),
            '+' => out.push_str("%2B"),
            '"' => out.push_str("%22"),
            ' ' => out.push('+'),
            c if c.is_whitespace() => {
                let mut buf = [0u8; 4];
                for b in c.encode_utf8(&mut buf).bytes() {
                    out.push_str(&format!("%{b:02X}"));
                }
            }
            _ => out.push(ch),
        }
    }
    out
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn describe_term(term: &Term) -> String {
    let prefix: &str = if term.negated { "exclude " } else { "" };
    let operand: String = escape_html(&term.operand);
    if term.operand.is_empty() {
        return format!("{prefix}{}:", escape_html(&term.operator));
    }
    let phrase: String = match term.operator.as_str() {
        "search" => format!("search for {operand}"),
        "channel" => format!("messages in #{operand}"),
        "channels" => format!("messages in {operand} channels"),
        "topic" => format!("topic {operand}"),
        "sender" => format!("messages sent by {operand}"),
        "dm" => format!("direct messages with {operand}"),
        "dm-including" => format!("direct messages including {operand}"),
        "id" => format!("message ID {operand}"),
        "near" => format!("messages around {operand}"),
        "with" => format!("conversation of message {operand}"),
        "has" => match term.operand.as_str() {
            "image" | "link" | "attachment" | "reaction" => format!("messages with {operand}s"),
            _ => format!("invalid {operand} operand for has operator"),
        },
        "in" => match term.operand.as_str() {
            "home" => "messages in home".to_string(),
            "all" => "messages in all channels".to_string(),
            _ => format!("invalid {operand} operand for in operator"),
        },
        "is" => match term.operand.as_str() {
            "dm" | "private" => "direct messages".to_string(),
            "starred" => "starred messages".to_string(),
            "mentioned" => "messages that mention you".to_string(),
            "alerted" => "alerted messages".to_string(),
            "unread" => "unread messages".to_string(),
            "resolved" => "topics marked as resolved".to_string(),
            "followed" => "followed topics".to_string(),
            _ => format!("invalid {operand} operand for is operator"),
        },
        other => format!("{} {operand}", escape_html(other)),
    };
    format!("{prefix}{phrase}")
}
