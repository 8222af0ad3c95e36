//! Seam for the linked-data algorithms.
//!
//! Expansion, compaction, flattening, framing and RDF conversion are not
//! implemented here. A [`Processor`] supplies them over the IR, and [`Api`]
//! wraps one so callers can hand it YAML-LD text and get YAML-LD text back.

use crate::error::Error;
use crate::ir::{Ir, Literal};
use crate::options::Options;
use std::fmt;
use tracing::debug;

pub type ProcessorError = Box<dyn std::error::Error + Send + Sync>;

/// An RDF term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Iri(String),
    BlankNode(String),
    Literal(Literal),
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{iri}>"),
            Term::BlankNode(label) => write!(f, "_:{label}"),
            Term::Literal(literal) => {
                write!(f, "\"")?;
                for c in literal.value.chars() {
                    match c {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        '\r' => f.write_str("\\r")?,
                        c => write!(f, "{c}")?,
                    }
                }
                write!(f, "\"")?;
                if let Some(language) = &literal.language {
                    write!(f, "@{language}")?;
                    if let Some(direction) = literal.direction {
                        write!(f, "--{direction}")?;
                    }
                } else if let Some(datatype) = &literal.datatype {
                    write!(f, "^^<{datatype}>")?;
                }
                Ok(())
            }
        }
    }
}

/// One statement, printed in N-Triples form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

/// The linked-data algorithms, operating on IR.
pub trait Processor {
    fn expand(&self, input: &Ir) -> Result<Ir, ProcessorError>;

    fn compact(&self, input: &Ir, context: &Ir) -> Result<Ir, ProcessorError>;

    fn flatten(&self, input: &Ir, context: Option<&Ir>) -> Result<Ir, ProcessorError>;

    fn frame(&self, input: &Ir, frame: &Ir) -> Result<Ir, ProcessorError>;

    fn to_triples(&self, input: &Ir) -> Result<Vec<Triple>, ProcessorError>;

    fn from_triples(&self, triples: &[Triple]) -> Result<Ir, ProcessorError>;
}

/// YAML-LD text in, YAML-LD text out, around a [`Processor`].
pub struct Api<P> {
    processor: P,
    options: Options,
}

impl<P: Processor> Api<P> {
    pub fn new(processor: P, options: Options) -> Self {
        Api { processor, options }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn expand(&self, input: &str) -> Result<String, Error> {
        let input = self.load(input)?;
        let output = self.processor.expand(&input).map_err(Error::Processing)?;
        self.serialize(&output)
    }

    pub fn compact(&self, input: &str, context: &str) -> Result<String, Error> {
        let input = self.load(input)?;
        let context = self.load(context)?;
        let output = self
            .processor
            .compact(&input, &context)
            .map_err(Error::Processing)?;
        self.serialize(&output)
    }

    pub fn flatten(&self, input: &str, context: Option<&str>) -> Result<String, Error> {
        let input = self.load(input)?;
        let context = context.map(|c| self.load(c)).transpose()?;
        let output = self
            .processor
            .flatten(&input, context.as_ref())
            .map_err(Error::Processing)?;
        self.serialize(&output)
    }

    pub fn frame(&self, input: &str, frame: &str) -> Result<String, Error> {
        let input = self.load(input)?;
        let frame = self.load(frame)?;
        let output = self
            .processor
            .frame(&input, &frame)
            .map_err(Error::Processing)?;
        self.serialize(&output)
    }

    pub fn to_triples(&self, input: &str) -> Result<Vec<Triple>, Error> {
        let input = self.load(input)?;
        self.processor.to_triples(&input).map_err(Error::Processing)
    }

    pub fn from_triples(&self, triples: &[Triple]) -> Result<String, Error> {
        let output = self
            .processor
            .from_triples(triples)
            .map_err(Error::Processing)?;
        self.serialize(&output)
    }

    fn load(&self, text: &str) -> Result<Ir, Error> {
        crate::load(text, &self.options)
    }

    /// Results never keep shared structure: they are unshared before dumping.
    pub fn serialize(&self, ir: &Ir) -> Result<String, Error> {
        let ir = ir.unshared()?;
        debug!(profile = %self.options.profile, "serializing processor result");
        crate::dump(&ir, &self.options)
    }
}
