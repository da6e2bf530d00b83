/*!
*   Generates an ECDSA key pair, prints its Multikey export, then signs and verifies a message.
*/

use affinidi_ecdsa_multikey::{Curve, EcdsaMultikey, ExportOptions, RustCryptoProvider};
use affinidi_multikey_encoding::encode_base58btc;
use clap::{Parser, ValueEnum};
use tracing_subscriber::filter;

/// CLI Arguments
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Curve to generate the key pair on
    #[arg(value_enum, short, long, default_value = "p256")]
    curve: Curves,

    /// Message to sign
    #[arg(short, long, default_value = "key pair operations test")]
    message: String,

    /// Also print the secret Multikey
    #[arg(short, long)]
    secret: bool,
}

#[derive(Clone, Debug, ValueEnum)]
enum Curves {
    /// P256 NIST Curve (secp256r1)
    P256,

    /// P384 NIST Curve
    P384,

    /// P521 NIST Curve
    P521,

    /// Secp256k1 Curve
    Secp256k1,
}

impl From<Curves> for Curve {
    fn from(curve: Curves) -> Self {
        match curve {
            Curves::P256 => Curve::P256,
            Curves::P384 => Curve::P384,
            Curves::P521 => Curve::P521,
            Curves::Secp256k1 => Curve::Secp256k1,
        }
    }
}

fn main() {
    // construct a subscriber that prints formatted traces to stdout
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Logging failed, exiting...");

    let args = Args::parse();

    let key_pair = EcdsaMultikey::generate(RustCryptoProvider, args.curve.into()).unwrap();
    println!("key pair: {key_pair:?}");

    let exported = key_pair
        .export(&ExportOptions::new().with_secret_key(args.secret))
        .unwrap();
    println!("exported key pair:");
    println!("{}", serde_json::to_string_pretty(&exported).unwrap());

    let signer = key_pair.signer().unwrap();
    let verifier = key_pair.verifier();

    let message = args.message.as_bytes();
    let signature = signer.sign(message).unwrap();
    println!("algorithm: {}", signer.algorithm());
    println!("signature: {}", encode_base58btc(&signature));

    let result = verifier.verify(message, &signature).unwrap();
    println!("result: {result}");
}
