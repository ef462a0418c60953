//! 主体替换
//!
//! 把模板中的通用主体词 ("Subject"、"the subject's"、"主体的" 等) 替换为用户输入的主体。
//! 所有替换词合并为一个正则, 从左到右只扫描一遍, 替换结果不会被再次替换。

use std::collections::HashMap;

use regex::{Captures, Regex};

use crate::{
    error::Result,
    locale::{StringTable, SubjectTokens, TokenForm},
};

/// 主体替换器
#[derive(Debug, Clone)]
pub struct SubjectSubstituter {
    pattern: Regex,
    forms: HashMap<&'static str, TokenForm>,
    possessive_suffix: &'static str,
}

impl SubjectSubstituter {
    pub fn new(tokens: SubjectTokens, strings: &StringTable) -> Result<Self> {
        let alternation = tokens
            .iter()
            .map(|(token, _)| regex::escape(token))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = if strings.word_boundaries {
            format!(r"\b(?:{alternation})\b")
        } else {
            format!("(?:{alternation})")
        };

        Ok(Self {
            pattern: Regex::new(&pattern)?,
            forms: tokens.iter().copied().collect(),
            possessive_suffix: strings.possessive_suffix,
        })
    }

    /// 替换文本中的全部主体词
    pub fn apply(&self, text: &str, subject: &str) -> String {
        let subject = subject.trim();
        self.pattern
            .replace_all(text, |caps: &Captures| {
                let token = &caps[0];
                match self.forms.get(token) {
                    Some(TokenForm::Plain) => subject.to_string(),
                    Some(TokenForm::Capitalized) => capitalize(subject),
                    Some(TokenForm::Possessive) => format!("{subject}{}", self.possessive_suffix),
                    Some(TokenForm::CapitalizedPossessive) => {
                        format!("{}{}", capitalize(subject), self.possessive_suffix)
                    }
                    None => token.to_string(),
                }
            })
            .into_owned()
    }
}

/// 首字母大写, 其余字符保持不变
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
