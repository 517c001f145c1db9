use std::sync::Arc;
use std::thread;

use parshift::error::{Corner, ErrorKind};
use parshift::mesh::MeshUnit;
use parshift::{Error, Format, Point, Transformer};

fn semidyna() -> Transformer {
    let text = "\n".repeat(15)
        + "MeshCode dB(sec)  dL(sec) dH(m)
54401005  -0.00622   0.01516   0.09460
54401055  -0.00620   0.01529   0.08972
54401100  -0.00663   0.01492   0.10374
54401150  -0.00664   0.01506   0.10087
";
    Transformer::from_str(&text, Format::SemiDynaEXE).unwrap()
}

#[test]
fn test_forward_backward() {
    let tf = semidyna();
    assert_eq!(tf.unit(), MeshUnit::Five);

    for origin in [
        Point::new(36.10377479, 140.087855041, 2.34),
        Point::new(36.09, 140.07, 0.0),
        Point::new(36.12, 140.12, -10.0),
        Point::new(36.1, 140.1, 100.0),
    ] {
        let forward = tf.forward(&origin).unwrap();
        assert_ne!(forward, origin);

        for actual in [
            tf.backward(&forward).unwrap(),
            tf.backward_safe(&forward).unwrap(),
        ] {
            assert!((actual.latitude() - origin.latitude()).abs() < 1e-8);
            assert!((actual.longitude() - origin.longitude()).abs() < 1e-8);
            assert!((actual.altitude() - origin.altitude()).abs() < 1e-3);
        }
    }
}

#[test]
fn test_outside_of_grid() {
    let tf = semidyna();

    let actual = tf.forward(&Point::new(35.0, 135.0, 0.0));
    assert!(matches!(
        actual,
        Err(Error::ParameterNotFound {
            corner: Corner::SouthWest,
            ..
        })
    ));
    assert_eq!(
        tf.backward_safe(&Point::new(35.0, 135.0, 0.0))
            .unwrap_err()
            .kind(),
        ErrorKind::ParameterNotFound
    );
}

#[test]
fn test_shared() {
    let tf = Arc::new(semidyna());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let tf = Arc::clone(&tf);
            thread::spawn(move || {
                let origin = Point::new(36.09 + 0.001 * i as f64, 140.07, 0.0);
                let forward = tf.forward(&origin).unwrap();
                (origin, tf.backward_safe(&forward).unwrap())
            })
        })
        .collect();

    for handle in handles {
        let (origin, actual) = handle.join().unwrap();
        assert!((actual.latitude() - origin.latitude()).abs() < 1e-8);
        assert!((actual.longitude() - origin.longitude()).abs() < 1e-8);
    }
}

#[test]
fn test_statistics() {
    let stats = semidyna().statistics();
    assert_eq!(stats.latitude.count, Some(4));
    assert_eq!(stats.altitude.max, Some(0.10374));
    assert_eq!(stats.longitude.min, Some(0.01492));
}
