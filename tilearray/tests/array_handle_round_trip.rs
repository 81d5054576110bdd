#![allow(missing_docs)]

use bytemuck::Zeroable;
use tilearray::backend::DataTypeV2;
use tilearray::backend::store::{MemoryArrayV2, MemoryArrayV3};
use tilearray::data_type_mapping::data_type_to_v3;
use tilearray::{ArrayHandle, Element};

const ARRAY_SHAPE: [i32; 2] = [5, 4];
const CHUNK_SHAPE: [i32; 2] = [2, 3];
const TILE_SHAPE: [i32; 2] = [3, 3];
const TILE_OFFSET: [i32; 2] = [2, 1];

/// Write a tile spanning partial edge chunks, then check it reads back unchanged and the rest of the array is zero.
fn round_trip<T: Element + PartialEq>(
    handle: &ArrayHandle,
    tile: &[T],
) -> Result<(), Box<dyn std::error::Error>> {
    handle.write_elements(tile, &TILE_SHAPE, &TILE_OFFSET)?;
    assert_eq!(handle.read_elements::<T>(&TILE_SHAPE, &TILE_OFFSET)?, tile);

    let mut array = vec![T::zeroed(); 20];
    handle.read(&mut array, &ARRAY_SHAPE, &[0, 0])?;
    for (index, element) in array.iter().enumerate() {
        let (row, column) = (index / 4, index % 4);
        if row >= 2 && column >= 1 {
            assert_eq!(*element, tile[(row - 2) * 3 + column - 1]);
        } else {
            assert_eq!(*element, T::zeroed());
        }
    }
    Ok(())
}

macro_rules! round_trip_test {
    ($name:ident, $type:ty, [$($tag:literal),+]) => {
        #[test]
        fn $name() -> Result<(), Box<dyn std::error::Error>> {
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_lossless)]
            let tile: Vec<$type> = (0u8..9).map(|i| (i as $type) * (3 as $type) + (1 as $type)).collect();
            let data_type = <$type as Element>::DATA_TYPE;

            $(
                let data_type_v2: DataTypeV2 = $tag.parse()?;
                let array = MemoryArrayV2::new(ARRAY_SHAPE.to_vec(), CHUNK_SHAPE.to_vec(), data_type_v2)?;
                let handle = ArrayHandle::from_v2(&array);
                assert_eq!(handle.data_type()?, data_type);
                round_trip(&handle, &tile)?;
            )+

            let array = MemoryArrayV3::new(vec![5, 4], CHUNK_SHAPE.to_vec(), data_type_to_v3(data_type))?;
            let handle = ArrayHandle::from_v3(&array);
            assert_eq!(handle.data_type()?, data_type);
            round_trip(&handle, &tile)?;
            Ok(())
        }
    };
}

round_trip_test!(array_handle_round_trip_float64, f64, ["<f8", ">f8"]);
round_trip_test!(array_handle_round_trip_float32, f32, ["<f4", ">f4"]);
round_trip_test!(array_handle_round_trip_int32, i32, ["<i4", ">i4"]);
round_trip_test!(array_handle_round_trip_uint32, u32, ["<u4", ">u4"]);
round_trip_test!(array_handle_round_trip_int16, i16, ["<i2", ">i2"]);
round_trip_test!(array_handle_round_trip_uint16, u16, ["<u2", ">u2"]);
round_trip_test!(array_handle_round_trip_int8, i8, ["|i1"]);
round_trip_test!(array_handle_round_trip_uint8, u8, ["|u1"]);
