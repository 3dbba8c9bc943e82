//! Caro AI CLI
//!
//! 命令行界面，用于测试 AI 和人机对弈
//!
//! 支持两种模式：
//! 1. 单次命令模式：每次执行一个命令
//! 2. Server 模式：长驻进程，通过 stdin/stdout 通信

use caro_ai::{
    check_win, default_pattern_path, game_result, AIConfig, AIEngine, Board, CaroSession,
    GameLogic, GameResult, PatternConfig, PatternStore, Player, Position, SessionConfig,
    DEFAULT_STRATEGY,
};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "caro-ai")]
#[command(about = "Caro (Gomoku) AI Engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 选择 AI 走法
    Best {
        /// 棋盘记谱
        #[arg(long)]
        board: String,

        /// AI 执哪一方 (x / o)，默认取记谱中的回合，否则为 o
        #[arg(long)]
        player: Option<char>,

        /// AI 策略 (tiered, heuristic, random)
        #[arg(long, default_value = DEFAULT_STRATEGY)]
        strategy: String,

        /// 随机种子
        #[arg(long)]
        seed: Option<u64>,

        /// 棋型库文件
        #[arg(long)]
        patterns: Option<PathBuf>,

        /// 不参考棋型库
        #[arg(long)]
        no_learning: bool,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 判断某个位置是否五连
    Check {
        /// 棋盘记谱
        #[arg(long)]
        board: String,

        #[arg(long)]
        row: i32,

        #[arg(long)]
        col: i32,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 人机对弈
    Play {
        /// 人类执哪一方 (x 先手 / o 后手)
        #[arg(long, default_value = "x")]
        human: char,

        /// 随机种子
        #[arg(long)]
        seed: Option<u64>,

        /// 棋型库文件（默认在用户数据目录）
        #[arg(long)]
        patterns: Option<PathBuf>,

        /// 不记录、不学习
        #[arg(long)]
        no_learning: bool,
    },

    /// 查看棋型库
    Patterns {
        /// 棋型库文件（默认在用户数据目录）
        #[arg(long)]
        patterns: Option<PathBuf>,

        /// 显示前 N 条
        #[arg(long, default_value = "10")]
        top: usize,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 启动 server 模式（stdin/stdout 通信）
    Server {
        /// 棋型库文件
        #[arg(long)]
        patterns: Option<PathBuf>,
    },
}

#[derive(Serialize, Deserialize)]
struct MoveResult {
    row: i32,
    col: i32,
    reason: String,
    score: f64,
}

#[derive(Serialize, Deserialize)]
struct PatternSummary {
    row: i32,
    col: i32,
    frequency: u32,
    success_rate: f64,
    last_used: String,
}

#[derive(Serialize, Deserialize)]
struct PatternsResponse {
    total: usize,
    top: Vec<PatternSummary>,
}

// Server 模式的请求和响应结构
#[derive(Serialize, Deserialize)]
struct ServerRequest {
    cmd: String,
    #[serde(default)]
    board: String,
    #[serde(default)]
    player: Option<char>,
    #[serde(default)]
    strategy: Option<String>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    row: Option<i32>,
    #[serde(default)]
    col: Option<i32>,
}

#[derive(Serialize, Deserialize, Default)]
struct ServerResponse {
    ok: bool,
    #[serde(rename = "move", skip_serializing_if = "Option::is_none")]
    mv: Option<MoveResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    win: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    elapsed_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ServerResponse {
    fn success_move(mv: Option<MoveResult>, elapsed_ms: f64) -> Self {
        Self {
            ok: true,
            mv,
            elapsed_ms: Some(elapsed_ms),
            ..Default::default()
        }
    }

    fn success_check(win: bool) -> Self {
        Self {
            ok: true,
            win: Some(win),
            ..Default::default()
        }
    }

    fn error(msg: &str) -> Self {
        Self {
            ok: false,
            error: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match text {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn parse_player(c: char) -> Result<Player, String> {
    Player::from_symbol(c).ok_or_else(|| format!("Invalid player: {} (expected x or o)", c))
}

fn exit_with(err: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", err);
    std::process::exit(1);
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Best {
            board,
            player,
            strategy,
            seed,
            patterns,
            no_learning,
            json,
        } => {
            let store = match &patterns {
                Some(path) => PatternStore::load(path, PatternConfig::default()),
                None => PatternStore::default(),
            };
            let start = Instant::now();
            match select_move(&board, player, &strategy, seed, !no_learning, &store) {
                Ok(mv) => {
                    let elapsed = start.elapsed().as_secs_f64();
                    if json {
                        print_json(&mv, true);
                    } else {
                        match mv {
                            Some(mv) => println!(
                                "Best move (strategy={}): ({}, {}) [{}] score={:.1}",
                                strategy, mv.row, mv.col, mv.reason, mv.score
                            ),
                            None => println!("Board is full, no move"),
                        }
                        println!("\nTime: {:.3}s", elapsed);
                    }
                }
                Err(e) => exit_with(e),
            }
        }

        Commands::Check {
            board,
            row,
            col,
            json,
        } => match Board::from_notation(&board) {
            Ok(b) => {
                let win = check_win(&b, Position::new(row, col));
                if json {
                    print_json(&ServerResponse::success_check(win), false);
                } else {
                    println!("({}, {}) wins: {}", row, col, win);
                }
            }
            Err(e) => exit_with(e),
        },

        Commands::Play {
            human,
            seed,
            patterns,
            no_learning,
        } => {
            let human = parse_player(human).unwrap_or_else(|e| exit_with(e));
            let config = SessionConfig {
                human,
                learning: !no_learning,
                pattern_path: if no_learning {
                    None
                } else {
                    Some(patterns.unwrap_or_else(default_pattern_path))
                },
                ai: AIConfig {
                    seed,
                    ..Default::default()
                },
                ..Default::default()
            };
            let mut session = CaroSession::new(config).unwrap_or_else(|e| exit_with(e));
            if let Err(e) = run_play(&mut session) {
                exit_with(e);
            }
        }

        Commands::Patterns {
            patterns,
            top,
            json,
        } => {
            let path = patterns.unwrap_or_else(default_pattern_path);
            let store = PatternStore::load(&path, PatternConfig::default());
            let summaries: Vec<PatternSummary> = store
                .top_entries(top)
                .into_iter()
                .map(|e| PatternSummary {
                    row: e.position.row,
                    col: e.position.col,
                    frequency: e.frequency,
                    success_rate: e.success_rate,
                    last_used: e.last_used.to_rfc3339(),
                })
                .collect();

            if json {
                print_json(
                    &PatternsResponse {
                        total: store.len(),
                        top: summaries,
                    },
                    true,
                );
            } else {
                println!("Pattern store {:?}: {} entries", path, store.len());
                for s in &summaries {
                    println!(
                        "  ({}, {}) freq={} rate={:.2} weight={:.2} last={}",
                        s.row,
                        s.col,
                        s.frequency,
                        s.success_rate,
                        s.success_rate * s.frequency as f64,
                        s.last_used
                    );
                }
            }
        }

        Commands::Server { patterns } => {
            let store = match &patterns {
                Some(path) => PatternStore::load(path, PatternConfig::default()),
                None => PatternStore::default(),
            };
            run_server(&store);
        }
    }
}

/// 解析棋盘并让 AI 选一步
fn select_move(
    board_text: &str,
    player: Option<char>,
    strategy: &str,
    seed: Option<u64>,
    learning: bool,
    store: &PatternStore,
) -> Result<Option<MoveResult>, String> {
    let state = caro_ai::notation::parse_notation(board_text).map_err(|e| e.to_string())?;
    let player = match player {
        Some(c) => parse_player(c)?,
        None => state.turn.unwrap_or(Player::Second),
    };
    let board = Board::from(state);

    let config = AIConfig {
        seed,
        learning,
        ..Default::default()
    };
    let mut ai = AIEngine::from_strategy(strategy, &config)?;

    Ok(ai.select_move(&board, player, store).map(|mv| MoveResult {
        row: mv.position.row,
        col: mv.position.col,
        reason: mv.reason.to_string(),
        score: if mv.score.is_finite() { mv.score } else { f64::MAX },
    }))
}

/// 交互式对局
fn run_play(session: &mut CaroSession) -> io::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let human = session.human();

    loop {
        let mut board = Board::default();
        let mut turn = Player::First;
        println!("You are {}. Enter moves as row,col (q to quit).", human);

        let result = loop {
            if turn == human {
                println!("{}", board.render());
                print!("{}> ", human);
                io::stdout().flush()?;

                let line = match lines.next() {
                    Some(l) => l?,
                    None => return Ok(()),
                };
                let line = line.trim();
                if line.eq_ignore_ascii_case("q") {
                    return Ok(());
                }
                let pos = match Position::parse(line) {
                    Some(p) => p,
                    None => {
                        println!("Invalid input: {}", line);
                        continue;
                    }
                };
                if !session.make_move(pos, turn == Player::First, &mut board) {
                    println!("Cannot play at {}", pos);
                    continue;
                }
                let r = game_result(&board, pos);
                if r != GameResult::Ongoing {
                    break r;
                }
            } else {
                let pos = match session.get_ai_move(&board) {
                    Some(p) => p,
                    None => break GameResult::Draw,
                };
                session.make_move(pos, turn == Player::First, &mut board);
                if let Some(mv) = session.last_ai_move() {
                    println!("AI plays {} [{}]", pos, mv.reason);
                }
                let r = game_result(&board, pos);
                if r != GameResult::Ongoing {
                    break r;
                }
            }
            turn = turn.opposite();
        };

        println!("{}", board.render());
        match result {
            GameResult::Win(p) if p == human => println!("You win!"),
            GameResult::Win(_) => println!("AI wins."),
            _ => println!("Draw."),
        }
        session.set_game_winner(match result {
            GameResult::Win(p) => Some(p),
            _ => None,
        });
        session.reset();

        print!("Play again? (y/n) ");
        io::stdout().flush()?;
        match lines.next() {
            Some(Ok(l)) if l.trim().eq_ignore_ascii_case("y") => continue,
            _ => return Ok(()),
        }
    }
}

/// Server 模式主循环
/// 从 stdin 读取 JSON 请求，返回 JSON 响应到 stdout
fn run_server(store: &PatternStore) {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        // 空行跳过
        if line.trim().is_empty() {
            continue;
        }

        // 解析请求
        let request: ServerRequest = match serde_json::from_str(&line) {
            Ok(r) => r,
            Err(e) => {
                print_json(&ServerResponse::error(&format!("Invalid JSON: {}", e)), false);
                let _ = stdout.flush();
                continue;
            }
        };

        // 处理命令
        let response = match request.cmd.as_str() {
            "best" => handle_best_request(&request, store),
            "check" => handle_check_request(&request),
            "quit" => break,
            _ => ServerResponse::error(&format!("Unknown command: {}", request.cmd)),
        };

        // 返回响应
        print_json(&response, false);
        let _ = stdout.flush();
    }
}

/// 处理 best 命令
fn handle_best_request(request: &ServerRequest, store: &PatternStore) -> ServerResponse {
    let strategy = request.strategy.as_deref().unwrap_or(DEFAULT_STRATEGY);
    let start = Instant::now();

    match select_move(&request.board, request.player, strategy, request.seed, true, store) {
        Ok(mv) => ServerResponse::success_move(mv, start.elapsed().as_secs_f64() * 1000.0),
        Err(e) => ServerResponse::error(&format!("AI error: {}", e)),
    }
}

/// 处理 check 命令
fn handle_check_request(request: &ServerRequest) -> ServerResponse {
    let (row, col) = match (request.row, request.col) {
        (Some(r), Some(c)) => (r, c),
        _ => return ServerResponse::error("check requires row and col"),
    };
    match Board::from_notation(&request.board) {
        Ok(board) => ServerResponse::success_check(check_win(&board, Position::new(row, col))),
        Err(e) => ServerResponse::error(&format!("Invalid board: {}", e)),
    }
}
