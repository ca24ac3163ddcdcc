//! Reference validation against the source corpus

use crate::corpus::SourceCorpus;
use crate::extract::DocumentReferences;
use serde::Serialize;
use std::path::PathBuf;

/// An inline code span whose text occurs nowhere in the corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrokenReference {
    pub file: PathBuf,
    pub reference: String,
}

/// Every reference missing from `corpus`, in document then appearance order
pub fn find_broken(corpus: &SourceCorpus, documents: &[DocumentReferences]) -> Vec<BrokenReference> {
    documents
        .iter()
        .flat_map(|doc| {
            doc.references
                .iter()
                .filter(move |reference| !corpus.contains(reference))
                .map(move |reference| BrokenReference {
                    file: doc.file.clone(),
                    reference: reference.clone(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    async fn corpus_of(sources: &[&str]) -> SourceCorpus {
        let dir = tempdir().unwrap();
        let files: Vec<_> = sources
            .iter()
            .enumerate()
            .map(|(i, content)| {
                let path = dir.path().join(format!("f{i}.js"));
                fs::write(&path, content).unwrap();
                path
            })
            .collect();
        SourceCorpus::build(&files).await.unwrap()
    }

    fn doc(file: &str, references: &[&str]) -> DocumentReferences {
        DocumentReferences {
            file: PathBuf::from(file),
            references: references.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_found_references_are_not_broken() {
        let corpus = corpus_of(&["function renderWidget() {}"]).await;
        let docs = [doc("docs/a.md", &["renderWidget()", "renderWidget", "Widget"])];
        assert!(find_broken(&corpus, &docs).is_empty());
    }

    #[tokio::test]
    async fn test_one_finding_per_missing_span() {
        let corpus = corpus_of(&["function renderWidget() {}"]).await;
        let docs = [
            doc("docs/a.md", &["legacyInit()", "renderWidget()", "legacyInit()"]),
            doc("docs/b.md", &["oldApi"]),
        ];

        assert_eq!(
            find_broken(&corpus, &docs),
            vec![
                BrokenReference {
                    file: PathBuf::from("docs/a.md"),
                    reference: "legacyInit()".to_string(),
                },
                BrokenReference {
                    file: PathBuf::from("docs/a.md"),
                    reference: "legacyInit()".to_string(),
                },
                BrokenReference {
                    file: PathBuf::from("docs/b.md"),
                    reference: "oldApi".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_case_sensitive_match() {
        let corpus = corpus_of(&["const myFooBar = 1;"]).await;
        let docs = [doc("docs/a.md", &["FooBar", "foo"])];

        let broken = find_broken(&corpus, &docs);
        assert_eq!(broken.len(), 1);
        assert_eq!(broken[0].reference, "foo");
    }

    #[tokio::test]
    async fn test_whitespace_is_not_normalized() {
        let corpus = corpus_of(&["call(a, b)"]).await;
        let docs = [doc("docs/a.md", &["call(a, b)", "call(a,b)"])];

        let broken = find_broken(&corpus, &docs);
        assert_eq!(broken.len(), 1);
        assert_eq!(broken[0].reference, "call(a,b)");
    }

    #[tokio::test]
    async fn test_punctuation_span_can_break() {
        let corpus = corpus_of(&["x = 1"]).await;
        let docs = [doc("docs/a.md", &["=>", "="])];

        let broken = find_broken(&corpus, &docs);
        assert_eq!(broken.len(), 1);
        assert_eq!(broken[0].reference, "=>");
    }
}
