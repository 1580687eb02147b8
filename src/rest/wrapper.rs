use axum::http::HeaderMap;
use bytes::Bytes;
use std::io;

use super::converter::PersisterMessageConverter;
use super::persister::Persister;

/// An incoming HTTP message as seen by a message converter
pub trait HttpInputMessage {
    fn body(&self) -> io::Result<Bytes>;

    fn headers(&self) -> &HeaderMap;
}

/// A REST endpoint owning the resources being read. It gets a chance to
/// prime the persister before a request body is decoded.
pub trait RestController: Send + Sync {
    fn configure_persister(&self, _persister: &mut Persister, _converter: &PersisterMessageConverter) {}
}

/// Message whose body has already been collected
#[derive(Debug, Clone)]
pub struct BufferedMessage {
    headers: HeaderMap,
    body: Bytes,
}

impl BufferedMessage {
    pub fn new(headers: HeaderMap, body: Bytes) -> Self {
        Self { headers, body }
    }
}

impl HttpInputMessage for BufferedMessage {
    fn body(&self) -> io::Result<Bytes> {
        Ok(self.body.clone())
    }

    fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

/// Forwards a message unchanged and routes persister configuration to the
/// controller handling the request.
pub struct RestInputWrapper<'a, M> {
    message: M,
    controller: &'a dyn RestController,
}

impl<'a, M: HttpInputMessage> RestInputWrapper<'a, M> {
    pub fn new(message: M, controller: &'a dyn RestController) -> Self {
        Self {
            message,
            controller,
        }
    }

    pub fn configure_persister(&self, persister: &mut Persister, converter: &PersisterMessageConverter) {
        self.controller.configure_persister(persister, converter);
    }
}

impl<M: HttpInputMessage> HttpInputMessage for RestInputWrapper<'_, M> {
    fn body(&self) -> io::Result<Bytes> {
        self.message.body()
    }

    fn headers(&self) -> &HeaderMap {
        self.message.headers()
    }
}
