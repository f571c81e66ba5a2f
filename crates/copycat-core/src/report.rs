use crate::analysis::similarity;
use crate::error::Error;
use crate::model::Cluster;
use crate::normalizer::ContentCache;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

/// One reported cluster: the central file and every other member scored against it.
#[derive(Debug, Clone, Serialize)]
pub struct Case {
    pub number: usize,
    pub central: PathBuf,
    pub members: Vec<CaseMember>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseMember {
    pub path: PathBuf,
    /// Similarity to the central file, which may differ from any edge score in the
    /// graph when the two files are only connected transitively.
    pub similarity: f64,
}

pub fn build_cases(clusters: &[Cluster], cache: &ContentCache) -> Vec<Case> {
    clusters
        .iter()
        .filter(|c| !c.is_empty())
        .enumerate()
        .map(|(i, cluster)| {
            let central = cache.get_or_load(&cluster.central);
            let members = cluster
                .others()
                .map(|path| CaseMember {
                    path: path.clone(),
                    similarity: similarity(&central, &cache.get_or_load(path)),
                })
                .collect();
            Case {
                number: i + 1,
                central: cluster.central.clone(),
                members,
            }
        })
        .collect()
}

pub fn render_text<W: Write>(cases: &[Case], precision: usize, out: &mut W) -> Result<(), Error> {
    for case in cases {
        writeln!(out, "Case of possible plagiarism no. {}", case.number)?;
        writeln!(out, "{}", case.central.display())?;
        for member in &case.members {
            writeln!(
                out,
                "{}   [-- {:.*}% similar]",
                member.path.display(),
                precision,
                member.similarity
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn render_json<W: Write>(cases: &[Case], out: &mut W) -> Result<(), Error> {
    serde_json::to_writer_pretty(&mut *out, cases)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn sample_cases() -> Vec<Case> {
        vec![Case {
            number: 1,
            central: PathBuf::from("/subs/alice/main.c"),
            members: vec![
                CaseMember {
                    path: PathBuf::from("/subs/bob/main.c"),
                    similarity: 87.5,
                },
                CaseMember {
                    path: PathBuf::from("/subs/carol/main.c"),
                    similarity: 42.0,
                },
            ],
        }]
    }

    #[test]
    fn test_render_text_integer_percentages() {
        let mut out = Vec::new();
        render_text(&sample_cases(), 0, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Case of possible plagiarism no. 1\n\
             /subs/alice/main.c\n\
             /subs/bob/main.c   [-- 88% similar]\n\
             /subs/carol/main.c   [-- 42% similar]\n\
             \n"
        );
    }

    #[test]
    fn test_render_text_precision() {
        let mut out = Vec::new();
        render_text(&sample_cases(), 2, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("[-- 87.50% similar]"));
    }

    #[test]
    fn test_render_nothing_for_no_cases() {
        let mut out = Vec::new();
        render_text(&[], 0, &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_render_json() {
        let mut out = Vec::new();
        render_json(&sample_cases(), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["number"], 1);
        assert_eq!(value[0]["members"][0]["similarity"], 87.5);
    }

    #[test]
    fn test_member_scored_against_central_not_edge() {
        let tmp = tempdir().unwrap();
        let x = tmp.path().join("x.c");
        let y = tmp.path().join("y.c");
        fs::write(&x, "a\nb\nc\n").unwrap();
        fs::write(&y, "a\nb\nd\n").unwrap();

        let cache = ContentCache::new();
        let cluster = Cluster {
            central: x.clone(),
            members: vec![x.clone(), y.clone()],
        };
        let cases = build_cases(&[cluster], &cache);
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].central, x);
        assert_eq!(cases[0].members.len(), 1);
        assert_eq!(cases[0].members[0].path, y);
        assert_eq!(cases[0].members[0].similarity, 50.0);
    }
}
