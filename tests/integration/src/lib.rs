//! End-to-end tests for `kc-saml-core` live under `tests/`.
