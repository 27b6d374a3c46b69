//! 错误消息国际化
//!
//! 根据 `Accept-Language` 重写 Problem Details 的 `title`

use std::collections::HashMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Request, State};
use axum::http::header::ACCEPT_LANGUAGE;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use catalog_errors::ProblemDetails;

const EN: &[(&str, &str)] = &[
    ("bad_request", "Invalid request data"),
    ("conflict", "Data already exists"),
    ("not_found", "Resource not found"),
    ("forbidden", "You don't have access"),
    ("unauthorized", "Unauthorized"),
    ("internal_error", "Internal server error"),
];

const ID: &[(&str, &str)] = &[
    ("bad_request", "Data request tidak valid"),
    ("conflict", "Data sudah ada"),
    ("not_found", "Data tidak ditemukan"),
    ("forbidden", "Tidak memiliki akses"),
    ("unauthorized", "Tidak terotorisasi"),
    ("internal_error", "Terjadi kesalahan pada server"),
];

/// 错误消息翻译器
#[derive(Debug, Clone)]
pub struct Translator {
    default_lang: String,
    messages: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl Translator {
    pub fn new(default_lang: &str) -> Self {
        let messages: HashMap<_, HashMap<_, _>> = [("en", EN), ("id", ID)]
            .into_iter()
            .map(|(lang, table)| (lang, table.iter().copied().collect()))
            .collect();
        Self {
            default_lang: normalize_lang(default_lang).unwrap_or("en").to_string(),
            messages,
        }
    }

    /// 查找消息，语言不支持时回退到默认语言
    pub fn translate(&self, lang: Option<&str>, key: &str) -> Option<&'static str> {
        let lang = lang
            .and_then(normalize_lang)
            .unwrap_or(self.default_lang.as_str());
        self.messages
            .get(lang)
            .and_then(|table| table.get(key))
            .or_else(|| {
                self.messages
                    .get(self.default_lang.as_str())
                    .and_then(|table| table.get(key))
            })
            .copied()
    }
}

/// 只取首选语言的主标签，例如 `id-ID,id;q=0.9` → `id`
fn normalize_lang(header: &str) -> Option<&'static str> {
    let primary = header
        .split(',')
        .next()?
        .split(';')
        .next()?
        .trim()
        .to_ascii_lowercase();
    if primary.starts_with("id") {
        Some("id")
    } else if primary.starts_with("en") {
        Some("en")
    } else {
        None
    }
}

/// 本地化中间件：只处理携带 `ProblemDetails` 扩展的错误响应
pub async fn localize_errors(
    State(translator): State<Arc<Translator>>,
    request: Request,
    next: Next,
) -> Response {
    let lang = request
        .headers()
        .get(ACCEPT_LANGUAGE)
        .and_then(|h| h.to_str().ok())
        .map(str::to_owned);

    let response = next.run(request).await;
    let Some(mut problem) = response.extensions().get::<ProblemDetails>().cloned() else {
        return response;
    };
    let Some(title) = translator.translate(lang.as_deref(), &problem.key) else {
        return response;
    };

    problem.title = title.to_string();
    let mut localized = (response.status(), Json(problem.clone())).into_response();
    localized.extensions_mut().insert(problem);
    localized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_by_primary_language() {
        let translator = Translator::new("en");
        assert_eq!(
            translator.translate(Some("id-ID,id;q=0.9,en;q=0.8"), "not_found"),
            Some("Data tidak ditemukan")
        );
        assert_eq!(
            translator.translate(Some("en-US"), "conflict"),
            Some("Data already exists")
        );
    }

    #[test]
    fn test_unknown_language_falls_back_to_default() {
        let translator = Translator::new("id");
        assert_eq!(
            translator.translate(Some("fr-FR"), "bad_request"),
            Some("Data request tidak valid")
        );
        assert_eq!(
            translator.translate(None, "internal_error"),
            Some("Terjadi kesalahan pada server")
        );
        assert_eq!(translator.translate(Some("en"), "no_such_key"), None);
    }
}
