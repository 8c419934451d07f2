#[test]
fn test1() {
    #[genmock::generate_mock]
    trait Trait {
        fn new() -> Self;
        fn f(&self) -> i32;
    }

    let m = <TraitMock as Trait>::new();
    m.mocks.f.returns(1);

    assert_eq!(m.f(), 1);
}

#[test]
fn test2() {
    #[genmock::generate_mock]
    trait Trait: Sized {
        fn connect(url: &str, retries: u32) -> std::io::Result<Self>;
        fn parse(raw: String) -> Option<Self>;
    }

    assert!(TraitMock::connect("tcp://localhost", 3).is_ok());
    assert!(TraitMock::parse(String::new()).is_some());
}

#[test]
fn test3() {
    fn build<T: Trait>() -> T {
        T::create(0)
    }

    #[genmock::generate_mock]
    trait Trait {
        fn create(seed: u64) -> Self
        where
            Self: Sized;

        fn seed(&self) -> u64;
    }

    let m: TraitMock = build();
    assert!(!m.mocks.seed.was_called());
}

#[test]
fn test4() {
    #[genmock::generate_mock]
    trait Trait: Default {
        fn with_name(name: String) -> Self;
        fn name(&self) -> String;
    }

    let m = TraitMock::default();
    m.mocks.name.returns("default".to_owned());

    assert_eq!(m.name(), "default");
}
