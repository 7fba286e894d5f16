pub mod pkce;
