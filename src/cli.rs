use clap::{Parser, Subcommand, ValueEnum};
use imsteg_common::Mode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "imsteg")]
#[command(about = "画像にテキストを埋め込み/取り出すImStegクライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 送信先サーバーURL（設定ファイルより優先）
    #[arg(long, global = true)]
    pub server: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像に秘密のテキストを埋め込む
    Encode {
        /// 画像ファイル
        #[arg(required = true)]
        image: PathBuf,

        /// 公開鍵ファイル（省略時は設定値）
        #[arg(short, long)]
        pubkey: Option<PathBuf>,

        /// 埋め込むテキスト（省略時は入力を求める）
        #[arg(short, long)]
        text: Option<String>,
    },

    /// 画像からテキストを取り出す
    Decode {
        /// 画像ファイル
        #[arg(required = true)]
        image: PathBuf,

        /// 公開鍵ファイル（省略時は設定値）
        #[arg(short, long)]
        pubkey: Option<PathBuf>,

        /// 秘密鍵ファイル（省略時は設定値）
        #[arg(long)]
        prvkey: Option<PathBuf>,

        /// 秘密鍵のパスフレーズ（省略時は入力を求める）
        #[arg(long)]
        passphrase: Option<String>,

        /// 結果をクリップボードへコピー
        #[arg(short, long)]
        copy: bool,
    },

    /// 直前の結果をサーバー側で指定パスへ複製
    Replicate {
        /// 複製先の完全パス（省略時は入力を求める）
        path: Option<String>,

        /// 送信時のモード
        #[arg(short, long, default_value = "encode")]
        mode: ModeArg,
    },

    /// 設定を表示/編集
    Config {
        /// サーバーURLを設定
        #[arg(long)]
        set_server: Option<String>,

        /// 既定の公開鍵ファイルを設定
        #[arg(long)]
        set_public_key: Option<PathBuf>,

        /// 既定の秘密鍵ファイルを設定
        #[arg(long)]
        set_private_key: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ModeArg {
    Encode,
    Decode,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Encode => Mode::Encode,
            ModeArg::Decode => Mode::Decode,
        }
    }
}
