//! EchoVerse — AI-powered audiobook creation.
//!
//! Turns plain text into an expressive audiobook in two hops:
//!
//! ```text
//! text ──► tone rewrite (IBM Granite via Hugging Face) ──► speech synthesis
//!          [rewrite]                                        (IBM Watson TTS)
//!                                                           [tts] ──► MP3
//! ```
//!
//! # Modules
//!
//! | Module     | Responsibility |
//! |------------|----------------|
//! | [`config`] | TOML settings, paths, env-var credential overlay |
//! | [`session`]| Input text, file loading (20 MB / UTF-8), tone + voice |
//! | [`rewrite`]| Granite prompt building and HTTP rewrite client |
//! | [`tts`]    | Watson Text-to-Speech client, voice catalog |
//! | [`pipeline`]| Background orchestrator and shared UI state |
//! | [`audio`]  | MP3 playback, `audiobook.mp3` export, data-URI embedding |
//! | [`app`]    | egui window |

pub mod app;
pub mod audio;
pub mod config;
pub mod pipeline;
pub mod rewrite;
pub mod session;
pub mod tts;
