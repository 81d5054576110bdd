#![allow(missing_docs)]

use serial_test::serial;
use tilearray::backend::DataTypeV3;
use tilearray::backend::store::{MemoryArrayV2, MemoryArrayV3};
use tilearray::config::global_config_mut;
use tilearray::{ArrayHandle, ArrayHandleError};

fn set_config(validate_tile_bounds: bool, log_partial_regions: bool) {
    let mut config = global_config_mut();
    config.set_validate_tile_bounds(validate_tile_bounds);
    config.set_log_partial_regions(log_partial_regions);
}

const PARTIAL_REGION_LOG: &str = "requested region with shape [5], got region with shape [2]";

#[test]
#[serial]
fn array_handle_partial_region() -> Result<(), Box<dyn std::error::Error>> {
    set_config(false, true);
    testing_logger::setup();

    let array = MemoryArrayV3::new(vec![10], vec![4], DataTypeV3::UInt8)?;
    let handle = ArrayHandle::from_v3(&array);
    handle.write_elements(&[7u8; 10], &[10], &[0])?;

    // The backend clips the region to the array extent
    let mut buf = [0u8; 5];
    let err = handle.read(&mut buf, &[5], &[8]).unwrap_err();
    let ArrayHandleError::RangeError(err) = err else {
        panic!("expected a range error, got {err}")
    };
    assert_eq!(err.shape(), &[5]);
    assert_eq!(err.offset(), &[8]);
    assert_eq!(err.array_shape(), &[10]);
    assert_eq!(buf, [0; 5]);

    testing_logger::validate(|captured_logs| {
        let partial_region_logs: Vec<_> = captured_logs
            .iter()
            .filter(|log| log.body == PARTIAL_REGION_LOG)
            .collect();
        assert_eq!(partial_region_logs.len(), 1);
        assert_eq!(partial_region_logs[0].level, log::Level::Debug);
    });

    set_config(true, true);
    Ok(())
}

#[test]
#[serial]
fn array_handle_partial_region_no_log() -> Result<(), Box<dyn std::error::Error>> {
    set_config(false, false);
    testing_logger::setup();

    let array = MemoryArrayV3::new(vec![10], vec![4], DataTypeV3::UInt8)?;
    let handle = ArrayHandle::from_v3(&array);
    assert!(matches!(
        handle.read_elements::<u8>(&[5], &[8]),
        Err(ArrayHandleError::RangeError(_))
    ));

    testing_logger::validate(|captured_logs| {
        assert!(captured_logs.iter().all(|log| log.body != PARTIAL_REGION_LOG));
    });

    set_config(true, true);
    Ok(())
}

#[test]
#[serial]
fn array_handle_backend_bounds() -> Result<(), Box<dyn std::error::Error>> {
    set_config(false, true);

    let array = MemoryArrayV2::new(vec![10], vec![4], "<i4".parse()?)?;
    let handle = ArrayHandle::from_v2(&array);
    assert!(matches!(
        handle.read_elements::<i32>(&[5], &[8]),
        Err(ArrayHandleError::RangeError(_))
    ));
    assert!(matches!(
        handle.write_elements(&[1i32; 2], &[2], &[-1]),
        Err(ArrayHandleError::RangeError(_))
    ));

    let array = MemoryArrayV3::new(vec![10], vec![4], DataTypeV3::Int32)?;
    let handle = ArrayHandle::from_v3(&array);
    assert!(matches!(
        handle.write_elements(&[1i32; 5], &[5], &[8]),
        Err(ArrayHandleError::RangeError(_))
    ));
    assert!(matches!(
        handle.read_elements::<i32>(&[1], &[11]),
        Err(ArrayHandleError::RangeError(_))
    ));
    assert!(matches!(
        handle.read_elements::<i32>(&[1], &[-1]),
        Err(ArrayHandleError::RangeError(_))
    ));
    assert_eq!(array.num_chunks_stored(), 0);

    set_config(true, true);
    Ok(())
}

#[test]
#[serial]
fn array_handle_log_read_write() -> Result<(), Box<dyn std::error::Error>> {
    set_config(true, true);
    testing_logger::setup();

    let array = MemoryArrayV2::new(vec![4, 4], vec![2, 2], "<f4".parse()?)?;
    let handle = ArrayHandle::from_v2(&array);
    handle.write_elements(&[1.0f32; 4], &[2, 2], &[1, 1])?;
    handle.read_elements::<f32>(&[1, 4], &[2, 0])?;

    testing_logger::validate(|captured_logs| {
        let debug_logs: Vec<_> = captured_logs
            .iter()
            .filter(|log| log.level == log::Level::Debug)
            .map(|log| log.body.as_str())
            .collect();
        assert_eq!(
            debug_logs,
            vec![
                "write tile with shape [2, 2] at offset [1, 1] to Zarr V2 array with shape [4, 4], chunks [2, 2] and data type <f4",
                "read tile with shape [1, 4] at offset [2, 0] from Zarr V2 array with shape [4, 4], chunks [2, 2] and data type <f4",
            ]
        );
    });
    Ok(())
}
