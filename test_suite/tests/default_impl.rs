#[test]
fn test1() {
    #[genmock::generate_mock]
    trait Trait {
        fn f1(&self) -> i32;

        #[genmock(default)]
        fn f2(&self) -> i32 {
            self.f1() + 1
        }
    }

    let m = TraitMock::new();
    m.mocks.f1.returns(1);

    assert_eq!(m.f2(), 2);
    assert_eq!(m.mocks.f1.call_count(), 1);
}

#[test]
fn test2() {
    #[genmock::generate_mock]
    trait Trait {
        fn f(&self) -> i32 {
            1
        }
    }

    let m = TraitMock::new();
    m.mocks.f.returns(2);

    assert_eq!(m.f(), 2);
}

#[test]
fn test3() {
    #[genmock::generate_mock]
    trait Trait {
        fn id(&self) -> u32;

        #[genmock(default)]
        fn label(&self, prefix: &str) -> String {
            format!("{}-{}", prefix, self.id())
        }
    }

    let m = TraitMock::new();
    m.mocks.id.returns(7);

    assert_eq!(m.label("user"), "user-7");
}
