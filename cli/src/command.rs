//! Line-oriented command grammar.

use thiserror::Error;

use yacs_core::StorageError;
use yacs_types::{Interest, Listing, ListingId, Section, TermId, UnknownInterest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Term(TermId),
    Add {
        section: Section,
        interest: Option<Interest>,
        term: Option<TermId>,
    },
    Toggle {
        section: Section,
        term: Option<TermId>,
    },
    Remove {
        section: Section,
        term: Option<TermId>,
    },
    ToggleListing {
        listing: Listing,
        term: Option<TermId>,
    },
    RemoveListing {
        listing: ListingId,
        term: Option<TermId>,
    },
    Clear {
        term: Option<TermId>,
    },
    Selected {
        section: Section,
        term: Option<TermId>,
    },
    Interest {
        section: Section,
        term: Option<TermId>,
    },
    Pairs {
        term: Option<TermId>,
    },
    Sections {
        term: Option<TermId>,
    },
    Listings {
        term: Option<TermId>,
    },
    Quit,
}

impl Command {
    /// The `--term` override, if the command carries one.
    #[must_use]
    pub fn term(&self) -> Option<&TermId> {
        match self {
            Self::Add { term, .. }
            | Self::Toggle { term, .. }
            | Self::Remove { term, .. }
            | Self::ToggleListing { term, .. }
            | Self::RemoveListing { term, .. }
            | Self::Clear { term }
            | Self::Selected { term, .. }
            | Self::Interest { term, .. }
            | Self::Pairs { term }
            | Self::Sections { term }
            | Self::Listings { term } => term.as_ref(),
            Self::Term(_) | Self::Quit => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("'{command}' needs a {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),
    #[error("--term needs a value")]
    MissingTermValue,
    #[error(transparent)]
    Interest(#[from] UnknownInterest),
    #[error("'{command}' is not available with {backend} storage")]
    Unsupported {
        command: &'static str,
        backend: &'static str,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

struct Args<'a> {
    command: &'static str,
    words: std::vec::IntoIter<&'a str>,
}

impl<'a> Args<'a> {
    fn required(&mut self, argument: &'static str) -> Result<&'a str, CommandError> {
        self.words.next().ok_or(CommandError::MissingArgument {
            command: self.command,
            argument,
        })
    }

    fn optional(&mut self) -> Option<&'a str> {
        self.words.next()
    }

    fn rest(&mut self) -> Vec<&'a str> {
        self.words.by_ref().collect()
    }

    fn finish(mut self) -> Result<(), CommandError> {
        match self.words.next() {
            Some(extra) => Err(CommandError::UnexpectedArgument(extra.to_string())),
            None => Ok(()),
        }
    }

    fn section(&mut self) -> Result<Section, CommandError> {
        let listing = self.required("listing id")?;
        let section = self.required("section id")?;
        Ok(Section::new(section, listing))
    }
}

/// Split off `--term <id>` wherever it appears.
fn take_term<'a>(words: Vec<&'a str>) -> Result<(Vec<&'a str>, Option<TermId>), CommandError> {
    let mut rest = Vec::with_capacity(words.len());
    let mut term = None;
    let mut iter = words.into_iter();
    while let Some(word) = iter.next() {
        if word == "--term" {
            let value = iter.next().ok_or(CommandError::MissingTermValue)?;
            term = Some(TermId::from(value));
        } else {
            rest.push(word);
        }
    }
    Ok((rest, term))
}

/// Parse one input line. Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (words, term) = take_term(line.split_whitespace().collect())?;
    let mut words = words.into_iter();
    let Some(name) = words.next() else {
        return Err(CommandError::MissingArgument {
            command: "--term",
            argument: "command",
        });
    };

    let name: &'static str = match name {
        "term" => "term",
        "add" => "add",
        "toggle" => "toggle",
        "remove" => "remove",
        "toggle-listing" => "toggle-listing",
        "remove-listing" => "remove-listing",
        "clear" => "clear",
        "selected" => "selected",
        "interest" => "interest",
        "pairs" => "pairs",
        "sections" => "sections",
        "listings" => "listings",
        "quit" | "exit" => "quit",
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    let mut args = Args {
        command: name,
        words,
    };

    let command = match name {
        "term" => Command::Term(TermId::from(args.required("term id")?)),
        "add" => {
            let section = args.section()?;
            let interest = args.optional().map(str::parse::<Interest>).transpose()?;
            Command::Add {
                section,
                interest,
                term,
            }
        }
        "toggle" => Command::Toggle {
            section: args.section()?,
            term,
        },
        "remove" => Command::Remove {
            section: args.section()?,
            term,
        },
        "toggle-listing" => {
            let listing_id = args.required("listing id")?;
            let sections = args.rest();
            if sections.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: name,
                    argument: "section id",
                });
            }
            Command::ToggleListing {
                listing: Listing::with_sections(listing_id, sections),
                term,
            }
        }
        "remove-listing" => Command::RemoveListing {
            listing: ListingId::from(args.required("listing id")?),
            term,
        },
        "clear" => Command::Clear { term },
        "selected" => Command::Selected {
            section: args.section()?,
            term,
        },
        "interest" => Command::Interest {
            section: args.section()?,
            term,
        },
        "pairs" => Command::Pairs { term },
        "sections" => Command::Sections { term },
        "listings" => Command::Listings { term },
        _ => Command::Quit,
    };
    args.finish()?;
    Ok(Some(command))
}
