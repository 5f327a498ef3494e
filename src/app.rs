//! The search → pick → copy flow, independent of the real HTTP client and
//! external programs.

use log::*;

use crate::clipboard::Clipboard;
use crate::codec;
use crate::error::{Error, Result};
use crate::format;
use crate::fzf::Selector;
use crate::model::passwork::PasswordDetail;
use crate::passwork::Vault;

/// How a run that didn't fail ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    NoMatches,
    NoUsableEntries,
    Cancelled,
    Copied { name: String },
}

pub fn run<V, S, C>(vault: &V, query: &str, selector: &S, clipboard: &C) -> Result<Outcome>
where
    V: Vault + ?Sized,
    S: Selector + ?Sized,
    C: Clipboard + ?Sized,
{
    let hits = vault.search(query)?;
    if hits.is_empty() {
        return Ok(Outcome::NoMatches);
    }

    let details = fetch_all(vault, hits.iter().map(|h| h.id.as_str()));
    if details.is_empty() {
        return Ok(Outcome::NoUsableEntries);
    }

    let lines: Vec<String> = details.iter().map(format::line).collect();
    let selected = match selector.select(&lines)? {
        Some(line) => line,
        None => return Ok(Outcome::Cancelled),
    };

    let id = format::split_id(&selected);
    let chosen = details
        .iter()
        .find(|d| d.id == id)
        .ok_or_else(|| Error::NotFound(id.to_owned()))?;

    let secret = reveal_secret(chosen)?;
    clipboard.copy(&secret)?;
    Ok(Outcome::Copied {
        name: chosen.name.clone(),
    })
}

/// Fetches each id in turn, skipping the ones that fail.
pub fn fetch_all<'a, V, I>(vault: &V, ids: I) -> Vec<PasswordDetail>
where
    V: Vault + ?Sized,
    I: IntoIterator<Item = &'a str>,
{
    ids.into_iter()
        .filter_map(|id| match vault.get_password(id) {
            Ok(detail) => Some(detail),
            Err(e) => {
                warn!("skip {}: {}", id, e);
                None
            }
        })
        .collect()
}

/// The plain text secret of `detail`, ready for the clipboard.
pub fn reveal_secret(detail: &PasswordDetail) -> Result<String> {
    let raw = &detail.crypted_password;
    if raw.is_empty() {
        return Err(Error::EmptySecret);
    }
    Ok(codec::decode(raw).unwrap_or_else(|| {
        warn!("cannot base64-decode cryptedPassword, copying raw value");
        raw.to_owned()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiFailure;
    use crate::model::passwork::SearchHit;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    struct FakeVault {
        hits: Vec<SearchHit>,
        details: HashMap<String, PasswordDetail>,
        fetched: RefCell<Vec<String>>,
    }

    impl FakeVault {
        fn new(entries: &[(&str, &str, &str)]) -> FakeVault {
            FakeVault {
                hits: entries
                    .iter()
                    .map(|(id, name, _)| SearchHit {
                        id: id.to_string(),
                        name: name.to_string(),
                    })
                    .collect(),
                details: entries
                    .iter()
                    .map(|(id, name, secret)| {
                        let detail = PasswordDetail {
                            id: id.to_string(),
                            name: name.to_string(),
                            crypted_password: secret.to_string(),
                            ..PasswordDetail::default()
                        };
                        (id.to_string(), detail)
                    })
                    .collect(),
                fetched: RefCell::new(vec![]),
            }
        }

        fn without_detail(mut self, id: &str) -> FakeVault {
            self.details.remove(id);
            self
        }
    }

    impl Vault for FakeVault {
        fn search(&self, _query: &str) -> Result<Vec<SearchHit>> {
            Ok(self.hits.clone())
        }

        fn get_password(&self, id: &str) -> Result<PasswordDetail> {
            self.fetched.borrow_mut().push(id.to_owned());
            self.details.get(id).cloned().ok_or_else(|| Error::Fetch {
                id: id.to_owned(),
                cause: ApiFailure::Status {
                    code: 404,
                    body: String::new(),
                },
            })
        }
    }

    /// Picks the line for `id`, or backs out when `id` is `None`.
    struct FakeSelector {
        id: Option<&'static str>,
        shown: RefCell<Option<Vec<String>>>,
    }

    impl FakeSelector {
        fn picking(id: Option<&'static str>) -> FakeSelector {
            FakeSelector {
                id,
                shown: RefCell::new(None),
            }
        }
    }

    impl Selector for FakeSelector {
        fn select(&self, lines: &[String]) -> Result<Option<String>> {
            *self.shown.borrow_mut() = Some(lines.to_vec());
            Ok(self.id.and_then(|id| {
                lines
                    .iter()
                    .find(|l| format::split_id(l) == id)
                    .cloned()
            }))
        }
    }

    #[derive(Default)]
    struct FakeClipboard {
        copied: RefCell<Option<String>>,
        calls: Cell<usize>,
    }

    impl Clipboard for FakeClipboard {
        fn copy(&self, text: &str) -> Result<()> {
            self.calls.set(self.calls.get() + 1);
            *self.copied.borrow_mut() = Some(text.to_owned());
            Ok(())
        }
    }

    #[test]
    fn copies_decoded_secret_of_selected_entry() {
        let vault = FakeVault::new(&[("a", "GitHub", "aGVsbG8="), ("b", "GitLab", "d29ybGQ=")]);
        let selector = FakeSelector::picking(Some("a"));
        let clipboard = FakeClipboard::default();

        let outcome = run(&vault, "git", &selector, &clipboard).unwrap();

        assert_eq!(
            outcome,
            Outcome::Copied {
                name: "GitHub".to_owned()
            }
        );
        assert_eq!(clipboard.copied.borrow().as_deref(), Some("hello"));
    }

    #[test]
    fn failed_fetch_is_skipped() {
        let vault = FakeVault::new(&[("a", "GitHub", "aGVsbG8="), ("b", "GitHub 2", "aGVsbG8=")])
            .without_detail("b");
        let selector = FakeSelector::picking(Some("a"));
        let clipboard = FakeClipboard::default();

        run(&vault, "github", &selector, &clipboard).unwrap();

        let shown = selector.shown.borrow().clone().unwrap();
        assert_eq!(shown.len(), 1);
        assert_eq!(format::split_id(&shown[0]), "a");
        assert_eq!(*vault.fetched.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn no_hits_never_shows_selector() {
        let vault = FakeVault::new(&[]);
        let selector = FakeSelector::picking(Some("a"));
        let clipboard = FakeClipboard::default();

        let outcome = run(&vault, "nothing", &selector, &clipboard).unwrap();

        assert_eq!(outcome, Outcome::NoMatches);
        assert!(selector.shown.borrow().is_none());
        assert_eq!(clipboard.calls.get(), 0);
    }

    #[test]
    fn all_fetches_failing_never_shows_selector() {
        let vault = FakeVault::new(&[("a", "GitHub", "aGVsbG8=")]).without_detail("a");
        let selector = FakeSelector::picking(Some("a"));
        let clipboard = FakeClipboard::default();

        let outcome = run(&vault, "", &selector, &clipboard).unwrap();

        assert_eq!(outcome, Outcome::NoUsableEntries);
        assert!(selector.shown.borrow().is_none());
    }

    #[test]
    fn cancelled_selection_leaves_clipboard_alone() {
        let vault = FakeVault::new(&[("a", "GitHub", "aGVsbG8=")]);
        let selector = FakeSelector::picking(None);
        let clipboard = FakeClipboard::default();

        let outcome = run(&vault, "", &selector, &clipboard).unwrap();

        assert_eq!(outcome, Outcome::Cancelled);
        assert_eq!(clipboard.calls.get(), 0);
    }

    #[test]
    fn empty_secret_is_an_error() {
        let vault = FakeVault::new(&[("a", "GitHub", "")]);
        let selector = FakeSelector::picking(Some("a"));
        let clipboard = FakeClipboard::default();

        let err = run(&vault, "", &selector, &clipboard).unwrap_err();

        assert!(matches!(err, Error::EmptySecret));
        assert_eq!(clipboard.calls.get(), 0);
    }

    #[test]
    fn undecodable_secret_is_copied_raw() {
        let detail = PasswordDetail {
            crypted_password: "not*base64".to_owned(),
            ..PasswordDetail::default()
        };
        assert_eq!(reveal_secret(&detail).unwrap(), "not*base64");
    }

    #[test]
    fn unknown_selection_is_not_found() {
        struct Stranger;
        impl Selector for Stranger {
            fn select(&self, _lines: &[String]) -> Result<Option<String>> {
                Ok(Some("zzz\tsomething else".to_owned()))
            }
        }
        let vault = FakeVault::new(&[("a", "GitHub", "aGVsbG8=")]);
        let clipboard = FakeClipboard::default();

        let err = run(&vault, "", &Stranger, &clipboard).unwrap_err();

        assert!(matches!(err, Error::NotFound(ref id) if id == "zzz"));
    }

    #[test]
    fn duplicate_hits_are_kept() {
        let mut vault = FakeVault::new(&[("a", "GitHub", "aGVsbG8=")]);
        vault.hits.push(vault.hits[0].clone());
        let selector = FakeSelector::picking(Some("a"));
        let clipboard = FakeClipboard::default();

        run(&vault, "", &selector, &clipboard).unwrap();

        assert_eq!(selector.shown.borrow().as_ref().unwrap().len(), 2);
    }
}
