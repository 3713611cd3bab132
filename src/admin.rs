//! Maintenance commands run by the `phonebook-admin` binary against a `DocumentStore` file.
//!
//! ```text
//! phonebook-admin <data-file>                  # print every contact
//! phonebook-admin <data-file> <name> <number>  # add a contact
//! ```

use std::io::Write;

use crate::contacts::{ContactStore, DocumentStore, NewContact};

/// Exit status for a wrong argument count.
pub const EXIT_USAGE: i32 = 1;

/// Runs one admin command. `args` includes the program name.
///
/// Normal output goes to `out`, usage text to `err`. Returns the exit status for a
/// completed command; store failures (including a duplicate name) are returned as `Err`.
pub async fn run<O, E>(args: &[String], out: &mut O, err: &mut E) -> anyhow::Result<i32>
where
    O: Write,
    E: Write,
{
    let program = args
        .first()
        .map(String::as_str)
        .unwrap_or("phonebook-admin");

    match args.len() {
        2 => {
            let store = DocumentStore::open(&args[1]).await?;
            writeln!(out, "phonebook:")?;
            for contact in store.list().await? {
                writeln!(out, "{} {}", contact.name, contact.number)?;
            }
            writeln!(
                out,
                "Those are all the contacts in {}",
                store.path().display()
            )?;
        }
        4 => {
            let store = DocumentStore::open(&args[1]).await?;
            let created = store
                .create(NewContact::new(args[2].as_str(), args[3].as_str()))
                .await?;
            writeln!(
                out,
                "added {} number {} to phonebook (id {})",
                created.name, created.number, created.id
            )?;
        }
        n => {
            print_usage(err, program, n.saturating_sub(1))?;
            return Ok(EXIT_USAGE);
        }
    }

    Ok(0)
}

fn print_usage<E: Write>(err: &mut E, program: &str, given: usize) -> std::io::Result<()> {
    writeln!(err, "You provided {} arguments", given)?;
    writeln!(err, "Please provide either 1 or 3 arguments")?;
    writeln!(err, "To print all people in the phonebook:")?;
    writeln!(err, "  {} <data-file>", program)?;
    writeln!(err, "To add a new person to the phonebook:")?;
    writeln!(err, "  {} <data-file> <name> <number>", program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contacts::StoreError;
    use tempfile::TempDir;

    fn args(parts: &[&str]) -> Vec<String> {
        std::iter::once("phonebook-admin")
            .chain(parts.iter().copied())
            .map(String::from)
            .collect()
    }

    async fn run_captured(parts: &[&str]) -> (anyhow::Result<i32>, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = run(&args(parts), &mut out, &mut err).await;
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap()
        )
    }

    #[tokio::test]
    async fn test_add_then_list() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("contacts.json");
        let file = file.to_str().unwrap();

        let (result, out, _) = run_captured(&[file, "Ada Lovelace", "39-44-5323523"]).await;
        assert_eq!(result.unwrap(), 0);
        assert!(
            out.starts_with("added Ada Lovelace number 39-44-5323523 to phonebook (id "),
            "unexpected output: {}",
            out
        );

        run_captured(&[file, "Dan Abramov", "12-43-234345"])
            .await
            .0
            .unwrap();

        let (result, out, _) = run_captured(&[file]).await;
        assert_eq!(result.unwrap(), 0);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "phonebook:");
        assert_eq!(lines[1], "Ada Lovelace 39-44-5323523");
        assert_eq!(lines[2], "Dan Abramov 12-43-234345");
        assert!(lines[3].starts_with("Those are all the contacts in "));
        assert_eq!(lines.len(), 4);
    }

    #[tokio::test]
    async fn test_duplicate_name_is_an_error() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("contacts.json");
        let file = file.to_str().unwrap();

        run_captured(&[file, "Ada", "1"]).await.0.unwrap();
        let (result, out, _) = run_captured(&[file, "Ada", "2"]).await;

        let error = result.unwrap_err();
        assert!(matches!(
            error.downcast_ref::<StoreError>(),
            Some(StoreError::Conflict { .. })
        ));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_wrong_argument_count_prints_usage() {
        for parts in [&[][..], &["a.json", "Ada"][..], &["a", "b", "c", "d"][..]] {
            let (result, out, err) = run_captured(parts).await;
            assert_eq!(result.unwrap(), EXIT_USAGE);
            assert!(out.is_empty());
            assert!(err.starts_with(&format!("You provided {} arguments", parts.len())));
            assert!(err.contains("phonebook-admin <data-file> <name> <number>"));
        }
    }
}
