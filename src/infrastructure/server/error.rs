use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("relay could not listen on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("relay server stopped: {0}")]
    Serve(#[from] std::io::Error),
}
