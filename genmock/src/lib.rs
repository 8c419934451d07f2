//! # Genmock
//!
//! This library provides the procedural macro that generates, next to a trait, a mock
//! struct whose members route every call through a recorder slot.
//!
//! ## User guide
//! - [Getting started](#getting-started)
//! - [Generated items](#generated-items)
//! - [Properties](#properties)
//! - [Fallible members](#fallible-members)
//! - [Associated types](#associated-types)
//! - [Constructors](#constructors)
//! - [Static functions](#static-functions)
//! - [Constants](#constants)
//! - [Default function implementation](#default-function-implementation)
//! - [async_trait](#async_trait)
//! - [Restrictions](#restrictions)
//!
//! ### Getting started
//!
//! Add the attribute macro to the trait you want a mock for:
//! ```
//! #[genmock::generate_mock]
//! trait Greeter {
//!     fn greet(&self, name: String, times: usize) -> String;
//! }
//!
//! let mock = GreeterMock::new();
//! mock.mocks.greet.returns_with(|(name, times)| name.repeat(*times));
//!
//! assert_eq!(mock.greet("ab".to_owned(), 2), "abab");
//! assert_eq!(mock.mocks.greet.calls(), vec![("ab".to_owned(), 2)]);
//! ```
//!
//! ### Generated items
//!
//! For a trait `Greeter` the macro emits, only when `debug_assertions` are on:
//! - `GreeterMockMembers`: one [`MockMember`] per property and method, named after it;
//! - `GreeterMock`: holds the members in its `mocks` field and implements `Greeter`;
//! - `GreeterMockStatics`: recorders of receiver-less functions, if there are any.
//!
//! A `pub` trait yields `pub` items, any other visibility yields `pub(crate)` items.
//! The mock name can be changed with `rename`:
//! ```
//! #[genmock::generate_mock(rename = "FakeGreeter")]
//! pub trait Greeter {
//!     fn greet(&self) -> String;
//! }
//!
//! let mock = FakeGreeter::new();
//! mock.mocks.greet.returns("hi".to_owned());
//! # assert_eq!(mock.greet(), "hi");
//! ```
//!
//! Arguments are recorded positionally. References are recorded as owned values:
//! ```
//! #[genmock::generate_mock]
//! trait Store {
//!     fn put(&self, key: &str, value: Vec<u8>);
//! }
//!
//! let mock = StoreMock::new();
//! mock.mocks.put.returns(());
//! mock.put("k", vec![1]);
//!
//! let calls: Vec<(String, Vec<u8>)> = mock.mocks.put.calls();
//! assert_eq!(calls, vec![("k".to_owned(), vec![1])]);
//! ```
//!
//! ### Properties
//!
//! Mark an accessor with `#[genmock(property)]`. The mock gets a `set_<name>` method
//! whose value is returned by every following read:
//! ```
//! #[genmock::generate_mock]
//! trait Named {
//!     #[genmock(property)]
//!     fn name(&self) -> String;
//! }
//!
//! let mock = NamedMock::new();
//! mock.set_name("Ferris".to_owned());
//! assert_eq!(mock.name(), "Ferris");
//! ```
//!
//! ### Fallible members
//!
//! Members returning `Result` store `Result<T, genmock::Error>`. The generated code
//! converts the error with `?`, so the declared error type has to implement
//! `From<genmock::Error>`. Properties returning `Result` get no setter.
//! ```
//! #[genmock::generate_mock]
//! trait Fetch {
//!     fn fetch(&self, id: u32) -> std::io::Result<String>;
//! }
//!
//! let mock = FetchMock::new();
//! mock.mocks.fetch
//!     .returns_once(Ok("first".to_owned()))
//!     .fails(std::fmt::Error);
//!
//! assert_eq!(mock.fetch(1).unwrap(), "first");
//! assert!(mock.fetch(2).is_err());
//! ```
//!
//! ### Associated types
//!
//! Associated types become generic parameters of the mock, keeping their first bound:
//! ```
//! #[genmock::generate_mock]
//! trait Source {
//!     type Item: Clone;
//!
//!     fn next(&self) -> Option<Self::Item>;
//! }
//!
//! let mock = SourceMock::<u8>::new();
//! mock.mocks.next.returns(Some(1));
//! assert_eq!(mock.next(), Some(1));
//! ```
//!
//! ### Constructors
//!
//! Receiver-less functions returning `Self` are satisfied with inert constructors that
//! ignore their arguments. A trait declaring any of them gets no `new()`:
//! ```
//! #[genmock::generate_mock]
//! trait Client {
//!     fn connect(url: &str) -> Self;
//!     fn ping(&self) -> bool;
//! }
//!
//! let mock = <ClientMock as Client>::connect("tcp://localhost");
//! mock.mocks.ping.returns(true);
//! assert!(mock.ping());
//! ```
//!
//! ### Static functions
//!
//! Other receiver-less functions are recorded per thread and reached through
//! `statics`:
//! ```
//! #[genmock::generate_mock]
//! trait Versioned {
//!     fn version() -> u32;
//! }
//!
//! VersionedMock::statics(|s| {
//!     s.version.returns(3);
//! });
//! assert_eq!(<VersionedMock as Versioned>::version(), 3);
//! ```
//!
//! ### Constants
//!
//! Constants take the trait's default value or the one given with `default`:
//! ```
//! #[genmock::generate_mock]
//! trait Limits {
//!     #[genmock(default = 16)]
//!     const MAX: usize;
//!     const MIN: usize = 1;
//! }
//!
//! assert_eq!(LimitsMock::MAX, 16);
//! assert_eq!(LimitsMock::MIN, 1);
//! ```
//!
//! ### Default function implementation
//!
//! Methods with a default body are mocked like any other method, unless marked with
//! `#[genmock(default)]`:
//! ```
//! #[genmock::generate_mock]
//! trait Trait {
//!     fn f1(&self) -> i32;
//!
//!     #[genmock(default)]
//!     fn f2(&self) -> i32 {
//!         self.f1() + 1
//!     }
//! }
//!
//! let mock = TraitMock::new();
//! mock.mocks.f1.returns(1);
//! assert_eq!(mock.f2(), 2);
//! ```
//!
//! ### async_trait
//!
//! `generate_mock` must be placed above [`async_trait`](https://docs.rs/async-trait),
//! the attribute is forwarded to the generated implementation:
//! ```
//! #[genmock::generate_mock]
//! #[genmock::async_trait]
//! trait Remote {
//!     async fn call(&self, request: String) -> String;
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mock = RemoteMock::new();
//! mock.mocks.call.returns_with(|(request,)| request.to_uppercase());
//! assert_eq!(mock.call("ping".to_owned()).await, "PING");
//! # }
//! ```
//!
//! ### Restrictions
//!
//! - Generic methods and lifetime parameters on the trait are not supported
//! - `impl Trait` is not allowed in argument or return position
//! - Borrowed arguments must be plain references (`&T`, `&mut T`) with `T: ToOwned`
//! - Returned references must be `'static`
//! - Property types must be `Clone`
//! - Supertraits other than `Debug` and `Default` must be implemented by hand

mod error;
mod member;
mod statics;

pub use async_trait::async_trait;
pub use genmock_derive::generate_mock;

pub use error::Error;
pub use member::MockMember;
pub use statics::with_statics;
