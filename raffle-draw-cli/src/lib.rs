//! This module contains test vectors for the draws performed by the raffle-cli tool.
pub mod raffle_cli_test_vectors {

    /// A draw given by explicit flags, and the winners it must produce.
    pub struct TestVector {
        pub name: &'static str,
        pub seed: &'static str,
        pub hash: &'static str,
        pub min: u32,
        pub max: u32,
        pub count: usize,
        pub exclude: &'static str,
        pub winners: &'static str,
    }

    /// The CBOX team and investor exclusions in compact form.
    pub const CBOX_EXCLUDE: &str = "0,678-679,742,2478-2479,2654,3217,3637,3826,3972-3973,4037,5046,5174,5217,5285,5476-5574,5599-5636,5642-5648,5714,5745,5926,6104-6117,6120,6124-6164,6277";

    const MD5_TEST: TestVector = TestVector {
        name: "md5",
        seed: "1234",
        hash: "md5",
        min: 1,
        max: 100,
        count: 5,
        exclude: "",
        winners: "34,24,36,87,55",
    };

    const SHA256_TEST: TestVector = TestVector {
        name: "sha256",
        hash: "sha256",
        winners: "99,32,45,24,36",
        ..MD5_TEST
    };

    const SHA3_256_TEST: TestVector = TestVector {
        name: "sha3-256",
        hash: "sha3-256",
        winners: "90,40,96,63,77",
        ..MD5_TEST
    };

    const BLAKE2B_256_TEST: TestVector = TestVector {
        name: "blake2b-256",
        hash: "blake2b-256",
        winners: "88,98,34,52,62",
        ..MD5_TEST
    };

    const EXCLUDED_TEST: TestVector = TestVector {
        name: "excluded",
        seed: "cli",
        hash: "md5",
        min: 0,
        max: 9,
        count: 4,
        exclude: "0-2",
        winners: "8,5,7,6",
    };

    const CBOX_TEST: TestVector = TestVector {
        name: "cbox",
        seed: "1234",
        hash: "md5",
        min: 0,
        max: 6302,
        count: 3,
        exclude: CBOX_EXCLUDE,
        winners: "2663,1415,1772",
    };

    const SHUFFLE_TEST: TestVector = TestVector {
        name: "cbox-shuffle",
        seed: "63477085376221734204645267060198448640767645553793835987915088287774969511994",
        hash: "md5",
        min: 0,
        max: 13,
        count: 14,
        exclude: "",
        winners: "1,6,7,9,0,4,5,3,12,8,10,13,11,2",
    };

    pub const TEST_VECTORS: &[TestVector] = &[
        MD5_TEST,
        SHA256_TEST,
        SHA3_256_TEST,
        BLAKE2B_256_TEST,
        EXCLUDED_TEST,
        CBOX_TEST,
        SHUFFLE_TEST,
    ];
}
