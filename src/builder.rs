//! The long-lived entry point that ties encoding and path synthesis
//! together.

use log::debug;

use crate::encoder::{self, EncodedSymbol};
use crate::error::Error;
use crate::models::{ECLevel, Size};
use crate::path::sink::{DisplayList, PathSink};
use crate::path::synthesize;

/// The data source that is used as the input when generating a symbol.
#[derive(Debug, Clone)]
enum DataSource {
    Binary(Vec<u8>),
    Text(String),
}

/// Builds a QR symbol and its rounded outline.
///
/// The builder owns its input and lazily computes the module grid and the
/// path command sequence; both are cached after the first use, so repeated
/// [`build_with_sink`](Builder::build_with_sink) calls replay an identical
/// command sequence without recomputation.
#[derive(Debug, Clone)]
pub struct Builder {
    data: DataSource,
    ec_level: ECLevel,
    size: Size,
    symbol: Option<EncodedSymbol>,
    path: Option<DisplayList>,
}

impl Builder {
    /// Creates a `Builder` with the specified bytes as input.
    pub fn binary(bytes: &[u8]) -> Self {
        Self::new(DataSource::Binary(bytes.to_vec()))
    }

    /// Creates a `Builder` with the specified Unicode string as input.
    pub fn text(text: &str) -> Self {
        Self::new(DataSource::Text(text.to_owned()))
    }

    /// Sets the error correction level for the symbol.
    pub fn error_correction_level(mut self, ec_level: ECLevel) -> Self {
        self.ec_level = ec_level;
        self
    }

    /// Sets the size of the output bounding box.
    pub fn size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// The configured bounding box.
    pub fn get_size(&self) -> Size {
        self.size
    }

    /// Encode now so that any failure surfaces before the first build call.
    ///
    /// Also precomputes the path, making later builds pure replays.
    pub fn prepare(&mut self) -> Result<(), Error> {
        self.display_list().map(|_| ())
    }

    /// The encoded symbol, computing and caching it on first access.
    pub fn symbol(&mut self) -> Result<&EncodedSymbol, Error> {
        let symbol = match self.symbol.take() {
            Some(symbol) => symbol,
            None => match &self.data {
                DataSource::Binary(bytes) => encoder::encode_bytes(bytes, self.ec_level)?,
                DataSource::Text(text) => encoder::encode_text(text, self.ec_level)?,
            },
        };
        Ok(self.symbol.insert(symbol))
    }

    /// Stream the rounded outline of the symbol into the sink.
    ///
    /// The command sequence is fully recorded before the first callback
    /// fires; on failure no callback is ever invoked.
    pub fn build_with_sink<S>(&mut self, sink: &mut S) -> Result<(), Error>
    where
        S: PathSink,
    {
        self.display_list()?.present(sink);
        Ok(())
    }

    fn new(data: DataSource) -> Self {
        Self {
            data,
            ec_level: ECLevel::M,
            size: Size {
                width: 256.0,
                height: 256.0,
            },
            symbol: None,
            path: None,
        }
    }

    fn display_list(&mut self) -> Result<&DisplayList, Error> {
        let list = match self.path.take() {
            Some(list) => list,
            None => {
                let size = self.size;
                let symbol = self.symbol()?;
                let mut list = DisplayList::new();
                synthesize(symbol.matrix(), size, &mut list);
                debug!("recorded {} path commands", list.len());
                list
            }
        };
        Ok(self.path.insert(list))
    }
}
