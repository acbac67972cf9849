use conflux::{
    domains::modulus::{P_128, P_256, P_512, P_SKS},
    FieldError, FiniteField, Strength, Zp,
};
use rand::{rngs::StdRng, SeedableRng};

fn samples(field: &FiniteField, n: usize, seed: u64) -> Vec<Zp> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut v: Vec<_> = (0..n).map(|_| Zp::random_with(field, &mut rng)).collect();
    v.push(Zp::zero(field));
    v.push(Zp::from_i64(field, 1));
    v.push(Zp::from_i64(field, -1));
    v
}

#[test]
fn closure_and_identities() {
    for field in [&*P_128, &*P_256, &*P_512, &*P_SKS] {
        let xs = samples(field, 20, 1);
        let one = Zp::from_i64(field, 1);

        for (x, y) in xs.iter().zip(xs.iter().rev()) {
            for r in [x + y, x - y, x * y] {
                assert!(r.value() < field.get_prime());
                assert!(*r.value() >= 0);
            }

            assert!((x + &-x).is_zero());

            if !x.is_zero() {
                assert_eq!(x * &x.inv().unwrap(), one);
            }

            if !y.is_zero() {
                assert_eq!(x.try_div(y).unwrap() * y, *x);
            }
        }
    }
}

#[test]
fn encoding_round_trips() {
    for s in Strength::ALL {
        let field = s.field();
        for x in samples(field, 20, 2) {
            assert_eq!(Zp::from_bytes(field, &x.to_bytes()), x);
            assert_eq!(Zp::parse(field, &x.to_string()).unwrap(), x);
        }
    }
}

#[test]
fn encoding_is_variable_length() {
    let small = Zp::from_i64(&P_256, 0x1234);
    assert_eq!(small.to_bytes(), vec![0x34, 0x12]);

    let minus_one = Zp::from_i64(&P_256, -1);
    assert_eq!(minus_one.to_bytes().len(), 33);
    assert_eq!(minus_one.to_bytes().first(), Some(&0x26));
    assert_eq!(minus_one.to_bytes().last(), Some(&0x01));
}

#[test]
fn fingerprint_to_element() {
    // a 16 byte fingerprint always fits the 128-bit field unreduced
    let fingerprint = [0xffu8; 16];
    let x = Zp::from_bytes(&P_128, &fingerprint);
    assert_eq!(x.to_bytes(), fingerprint.to_vec());
    assert_eq!(x.full_key_hash(), "ff".repeat(16));
}

#[test]
fn decimal_rendering() {
    let x = Zp::from_i64(&P_SKS, -1);
    assert_eq!(x.to_string(), "530512889551602322505127520352579437338");
    assert_eq!(Zp::zero(&P_SKS).to_string(), "0");
    assert_eq!(
        Zp::parse(&P_SKS, "530512889551602322505127520352579437340")
            .unwrap()
            .to_i64(),
        Some(1)
    );
}

#[test]
fn custom_modulus() {
    let field: FiniteField = "11".parse().unwrap();
    assert!(field.is_prime());

    let x = Zp::from_i64(&field, 7);
    let y = Zp::from_i64(&field, 5);
    assert_eq!((&x + &y).to_i64(), Some(1));
    assert_eq!((&x * &y).to_i64(), Some(2));
    assert_eq!(y.inv().unwrap().to_i64(), Some(9));
    assert_eq!(x.try_div(&y).unwrap().to_i64(), Some(8));

    assert!(matches!(
        "1".parse::<FiniteField>(),
        Err(FieldError::InvalidModulus(_))
    ));
}

#[test]
fn equal_moduli_are_the_same_field() {
    let a: FiniteField = P_SKS.get_prime().to_string().parse().unwrap();
    let x = Zp::from_i64(&a, 3) + Zp::from_i64(&P_SKS, 4);
    assert_eq!(x, Zp::from_i64(&P_SKS, 7));
}

#[test]
#[should_panic(expected = "expected finite field")]
fn mixing_fields_panics() {
    let _ = Zp::from_i64(&P_256, 2).pow(&Zp::from_i64(&P_512, 2));
}

#[test]
fn elements_are_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Zp>();
    assert_send_sync::<conflux::ZSet>();

    let x = Zp::from_i64(&P_SKS, 3);
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let x = x.clone();
            std::thread::spawn(move || &x * &Zp::from_i64(&P_SKS, i))
        })
        .collect();

    for (i, h) in handles.into_iter().enumerate() {
        assert_eq!(h.join().unwrap().to_i64(), Some(3 * i as i64));
    }
}
